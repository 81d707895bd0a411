//! CDG Tests
//!
//! Scenario framework for exercising the editor end to end. A scenario is
//! a named list of steps; each step performs one operation on named nodes
//! and checks the outcome and the resulting diagram.
//!
//! ```ignore
//! Scenario::new("pump")
//!     .step("bearing", Op::node("bearing", "Worn bearing"), |a| a.nodes(1))
//!     .step("pump", Op::node("pump", "Pump stops"), |a| a.nodes(2))
//!     .step("link", Op::link("bearing", "pump"), |a| a.edges(1))
//!     .step("trace", Op::trace("pump"), |a| a.roots(&["bearing"]))
//!     .run()
//!     .unwrap();
//! ```

mod assertion;
mod scenario;

pub use assertion::{Assertion, AssertionBuilder};
pub use error::{ScenarioError, ScenarioResult};
pub use scenario::{Op, Scenario, Step};

pub mod prelude {
    pub use crate::{Assertion, AssertionBuilder, Op, Scenario, ScenarioError, ScenarioResult};
    pub use cdg_core::{NodeCategory, NodeColor};
    pub use cdg_session::{EditorConfig, Outcome};
}
