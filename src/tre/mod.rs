//! TRE description engine: postfix evaluator, bounded integer stack,
//! field store, stateful cursor, and the byte-budgeted codec built on
//! top of them.

pub mod codec;
pub mod cursor;
pub mod description;
pub mod field_store;
pub mod handler;
pub mod int_stack;
pub mod postfix;

pub use codec::{read, write};
pub use cursor::TreCursor;
pub use description::{CountExpr, Description, DescriptionEntry, FieldKind, LengthExpr};
pub use field_store::{FieldStore, FieldValue};
pub use handler::{DescriptionTreHandler, TreHandler};
pub use int_stack::IntStack;
pub use postfix::{compose_tag, evaluate};
