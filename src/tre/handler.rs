//! `TreHandler`: a narrow trait-level capability for reading and writing
//! one TRE's fields. A per-tag registry that resolves a TRE tag to a
//! `TreHandler` lives outside this crate; this module only defines the
//! capability, not the registry.

use crate::error::Result;
use crate::io::IoInterface;
use crate::tre::codec;
use crate::tre::description::Description;
use crate::tre::field_store::FieldStore;

pub trait TreHandler {
    fn tag(&self) -> &str;
    fn read(&self, io: &mut dyn IoInterface, budget: usize) -> Result<FieldStore>;
    fn write(&self, store: &FieldStore, io: &mut dyn IoInterface) -> Result<usize>;
}

/// The only `TreHandler` this crate ships: one driven entirely by a
/// declarative `Description`, with no per-tag special-cased logic.
pub struct DescriptionTreHandler {
    description: Description,
}

impl DescriptionTreHandler {
    pub fn new(description: Description) -> Self {
        Self { description }
    }

    pub fn description(&self) -> &Description {
        &self.description
    }
}

impl TreHandler for DescriptionTreHandler {
    fn tag(&self) -> &str {
        &self.description.tag
    }

    fn read(&self, io: &mut dyn IoInterface, budget: usize) -> Result<FieldStore> {
        codec::read(&self.description, io, budget)
    }

    fn write(&self, store: &FieldStore, io: &mut dyn IoInterface) -> Result<usize> {
        codec::write(&self.description, store, io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::MemoryIo;
    use crate::tre::description::{DescriptionEntry, FieldKind, LengthExpr};

    #[test]
    fn dispatches_through_the_trait() {
        let desc = Description::new(
            "SIMPLE",
            vec![
                DescriptionEntry::field("A", LengthExpr::Literal(3), FieldKind::AsciiInteger),
                DescriptionEntry::End,
            ],
        )
        .unwrap();
        let handler: Box<dyn TreHandler> = Box::new(DescriptionTreHandler::new(desc));
        assert_eq!(handler.tag(), "SIMPLE");
        let mut io = MemoryIo::from_vec(b"012".to_vec());
        let store = handler.read(&mut io, 3).unwrap();
        assert_eq!(store.get("A").unwrap().bytes, b"012");
        let mut out = MemoryIo::new();
        handler.write(&store, &mut out).unwrap();
        assert_eq!(out.into_inner(), b"012");
    }
}
