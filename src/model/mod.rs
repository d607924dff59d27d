//! Network definitions for the adversarial pair

mod config;
mod discriminator;
mod generator;
mod linear;

pub use config::{DiscriminatorConfig, GanConfig, GeneratorConfig};
pub use discriminator::Discriminator;
pub use generator::Generator;
pub use linear::Linear;

/// Whether a forward pass records gradients on the tape.
///
/// `Detached` severs the output from the generator's parameters, so a
/// consumer (the discriminator during its own update) cannot push gradients
/// back into them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trace {
    /// Record the backward chain
    Recorded,
    /// Cut the tape at the output
    Detached,
}
