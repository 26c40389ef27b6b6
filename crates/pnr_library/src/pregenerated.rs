//! Pregenerates all four yaw rotations of every template in a library so the
//! placer and router can look up any `(name, turns)` pair in constant time.

use crate::rotate::rotate_template;
use crate::template::CellTemplate;
use pnr_common::{InternalError, PnrResult};
use std::collections::HashMap;

/// Immutable lookup from cell name to its four pregenerated rotations,
/// indexed `[turns]` for `turns` in `0..=3`.
pub struct PregeneratedCells {
    cells: HashMap<String, [CellTemplate; 4]>,
}

impl PregeneratedCells {
    /// Builds the pregenerated rotation table from a library's templates.
    ///
    /// Returns an [`InternalError`] if any template's own shape invariant
    /// (`blocks`/`data`/`mask`/`ports` agreement) doesn't hold — that check
    /// belongs to library load time, so seeing it fail here means a caller
    /// skipped [`CellTemplate::validate_shape`](crate::template::CellTemplate::validate_shape).
    pub fn build(templates: &HashMap<String, CellTemplate>) -> PnrResult<Self> {
        let mut cells = HashMap::with_capacity(templates.len());
        for (name, template) in templates {
            template
                .validate_shape()
                .map_err(|e| InternalError::new(format!("pregenerating '{name}': {e}")))?;
            let t0 = template.clone();
            let t1 = rotate_template(&t0, 1);
            let t2 = rotate_template(&t0, 2);
            let t3 = rotate_template(&t0, 3);
            cells.insert(name.clone(), [t0, t1, t2, t3]);
        }
        Ok(Self { cells })
    }

    /// Looks up a template by name and turn count (`0..=3`).
    ///
    /// Returns `None` if the name isn't in the library or `turns > 3`.
    pub fn get(&self, name: &str, turns: u32) -> Option<&CellTemplate> {
        self.cells.get(name)?.get(turns as usize)
    }

    /// Returns `true` if the given cell name exists in this table.
    pub fn contains(&self, name: &str) -> bool {
        self.cells.contains_key(name)
    }

    /// Returns the number of distinct cell names in this table.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` if this table has no entries.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
