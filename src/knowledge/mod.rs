// Portfolio knowledge module
// Author: kelexine (https://github.com/kelexine)

mod profile;
mod prompt;

pub use profile::{ChatSettings, Experience, PortfolioProfile, Profile, Project};
pub use prompt::{render_knowledge, system_prompt};
