mod engine;

pub use engine::{
    BlendParameters, BlendThreading, blend_channel, blend_pixel, compose, compose_with_threading,
    watermark_coord,
};
