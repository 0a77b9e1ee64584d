pub mod appeal;
pub mod case;
pub mod checklist;
pub mod denial;
pub mod guidelines;
pub mod letter;
pub mod patient;
pub mod recommendation;
pub mod snapshot;
pub mod usage;
