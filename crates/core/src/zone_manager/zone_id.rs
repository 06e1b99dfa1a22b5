//! `Overworld.<x>.<y>[.<depth>]` zone identifiers.

use std::fmt;

pub const OVERWORLD_PREFIX: &str = "Overworld";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ZoneCoords {
    pub x: i32,
    pub y: i32,
    /// 0 is the surface; larger values are further below it.
    pub depth: u32,
}

impl ZoneCoords {
    pub const fn surface(x: i32, y: i32) -> Self {
        Self { x, y, depth: 0 }
    }

    /// Accepts the four-field form and the legacy three-field surface form.
    /// Anything else, including negative depth, is `None`.
    pub fn parse(zone_id: &str) -> Option<Self> {
        let mut fields = zone_id.split('.');
        if fields.next()? != OVERWORLD_PREFIX {
            return None;
        }
        let x = fields.next()?.parse().ok()?;
        let y = fields.next()?.parse().ok()?;
        let depth = match fields.next() {
            Some(depth) => depth.parse().ok()?,
            None => 0,
        };
        if fields.next().is_some() {
            return None;
        }
        Some(Self { x, y, depth })
    }

    pub fn above(self) -> Option<Self> {
        let depth = self.depth.checked_sub(1)?;
        Some(Self { depth, ..self })
    }

    pub fn below(self) -> Self {
        Self { depth: self.depth.saturating_add(1), ..self }
    }

    pub fn zone_id(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ZoneCoords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{OVERWORLD_PREFIX}.{}.{}.{}", self.x, self.y, self.depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_four_field_form() {
        assert_eq!(
            ZoneCoords::parse("Overworld.3.7.2"),
            Some(ZoneCoords { x: 3, y: 7, depth: 2 })
        );
    }

    #[test]
    fn legacy_three_field_form_is_surface() {
        assert_eq!(ZoneCoords::parse("Overworld.10.10"), Some(ZoneCoords::surface(10, 10)));
    }

    #[test]
    fn malformed_ids_are_rejected() {
        for id in [
            "",
            "Overworld",
            "Overworld.1",
            "Underworld.1.2.0",
            "Overworld.a.2.0",
            "Overworld.1.2.-1",
            "Overworld.1.2.0.9",
            "Overworld.1..0",
        ] {
            assert_eq!(ZoneCoords::parse(id), None, "{id:?} should not parse");
        }
    }

    #[test]
    fn negative_surface_coordinates_still_parse() {
        assert_eq!(ZoneCoords::parse("Overworld.-1.4"), Some(ZoneCoords::surface(-1, 4)));
    }

    #[test]
    fn display_round_trips_through_parse() {
        let coords = ZoneCoords { x: 4, y: 9, depth: 1 };
        assert_eq!(coords.zone_id(), "Overworld.4.9.1");
        assert_eq!(ZoneCoords::parse(&coords.zone_id()), Some(coords));
    }

    #[test]
    fn surface_has_nothing_above() {
        assert_eq!(ZoneCoords::surface(0, 0).above(), None);
        assert_eq!(ZoneCoords::surface(0, 0).below().above(), Some(ZoneCoords::surface(0, 0)));
    }
}
