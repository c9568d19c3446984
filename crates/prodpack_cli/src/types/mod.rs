pub mod chunk_origin;
