#![warn(rust_2018_idioms)]
#![allow(dead_code)]

pub mod attribute;
pub mod direction;
pub mod document;
pub mod section;
pub mod session;
pub mod util;

mod error;
pub(crate) mod lexer;

pub use attribute::{SdpAttribute, SdpLine};
pub use document::SdpDocument;
pub use error::Error;
pub use section::SdpSection;
pub use session::{update_origin, RtcMedia, RtcPlan, RtcSession, RtcSsrc, SsrcRole};
