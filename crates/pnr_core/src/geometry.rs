//! Shared coordinate math: translating a template's local port coordinates
//! into global `(y, z, x)` space for a given placement.

use pnr_library::{CellTemplate, Facing};

/// Translates a local `(y, z, x)` coordinate by a placement anchor.
pub fn global_coord(anchor: (i64, i64, i64), local: (u32, u32, u32)) -> (i64, i64, i64) {
    (
        anchor.0 + local.0 as i64,
        anchor.1 + local.1 as i64,
        anchor.2 + local.2 as i64,
    )
}

/// Returns the global coordinate of a named port on a placed cell.
///
/// Returns `None` if the template has no such port.
pub fn pin_coord(
    template: &CellTemplate,
    anchor: (i64, i64, i64),
    port: &str,
) -> Option<(i64, i64, i64)> {
    template
        .ports
        .get(port)
        .map(|p| global_coord(anchor, p.coordinates))
}

/// Advances a coordinate one cell in the given facing direction.
pub fn step_toward(coord: (i64, i64, i64), facing: Facing) -> (i64, i64, i64) {
    let (dz, dx) = facing.step();
    (coord.0, coord.1 + dz, coord.2 + dx)
}

/// Returns a pin's `route_coord`: its pin coordinate advanced one cell in
/// its facing direction, so the conductor does not collide with the pin
/// cell itself (§3's `ExtendedPin`).
pub fn route_coord(
    template: &CellTemplate,
    anchor: (i64, i64, i64),
    port: &str,
) -> Option<(i64, i64, i64)> {
    let port_info = template.ports.get(port)?;
    let pin = global_coord(anchor, port_info.coordinates);
    Some(step_toward(pin, port_info.facing))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pnr_library::{Delay, Dims, Grid3, PinDirection, Port};
    use std::collections::HashMap;

    fn template_with_port() -> CellTemplate {
        let mut ports = HashMap::new();
        ports.insert(
            "Y".to_string(),
            Port {
                coordinates: (0, 0, 2),
                facing: Facing::East,
                direction: PinDirection::Output,
                level: 15,
            },
        );
        CellTemplate {
            name: "inv".into(),
            blocks: Grid3::filled(Dims::new(1, 1, 3), 0),
            data: Grid3::filled(Dims::new(1, 1, 3), 0),
            mask: Grid3::filled(Dims::new(1, 1, 3), true),
            ports,
            delay: Delay::default(),
        }
    }

    #[test]
    fn pin_coord_translates_by_anchor() {
        let t = template_with_port();
        assert_eq!(pin_coord(&t, (5, 5, 5), "Y"), Some((5, 5, 7)));
    }

    #[test]
    fn route_coord_steps_in_facing_direction() {
        let t = template_with_port();
        // facing East steps +X.
        assert_eq!(route_coord(&t, (5, 5, 5), "Y"), Some((5, 5, 8)));
    }

    #[test]
    fn missing_port_returns_none() {
        let t = template_with_port();
        assert_eq!(pin_coord(&t, (0, 0, 0), "Z"), None);
        assert_eq!(route_coord(&t, (0, 0, 0), "Z"), None);
    }
}
