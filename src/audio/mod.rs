pub mod analysis;
#[cfg(feature = "symphonia")]
pub mod backend;
pub mod decode;
pub mod describe;
pub mod energy;
pub mod features;
pub mod mix;
pub mod onset;
pub mod sections;
pub mod tempo;
