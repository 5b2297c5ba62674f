pub mod iiif_server;
