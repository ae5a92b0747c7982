mod image_io;
mod info;

pub use image_io::{OutputFormat, decode_file, decode_memory, encode_file};
pub use info::{ImageInfo, image_info};
