// Library exports for the landing page host and tests
pub mod camera;
pub mod command;
pub mod config;
pub mod consent;
pub mod contact_form;
pub mod error;
pub mod marquee;
pub mod navigation;
pub mod particle_field;
pub mod pointer;
pub mod renderer;
pub mod reveal;
pub mod site;
pub mod smooth_scroll;
pub mod tween;

// Re-export main types
pub use camera::Camera;
pub use command::Command;
pub use config::SiteConfig;
pub use consent::{ConsentBanner, ConsentStore, FileConsentStore, MemoryConsentStore};
pub use contact_form::{FormController, SimulatedSubmitter, Submitter};
pub use particle_field::{ParticleField, Point};
pub use renderer::Renderer;
pub use site::Site;
pub use smooth_scroll::ScrollController;
