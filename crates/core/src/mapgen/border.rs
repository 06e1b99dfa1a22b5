//! Border fill: a blocking terrain entity on every edge cell.

use crate::types::Pos;

use super::builder::{BuildContext, ZoneBuilder, priority};

pub struct BorderBuilder {
    wall_blueprint: String,
}

impl BorderBuilder {
    pub fn new(wall_blueprint: impl Into<String>) -> Self {
        Self { wall_blueprint: wall_blueprint.into() }
    }
}

impl ZoneBuilder for BorderBuilder {
    fn name(&self) -> &'static str {
        "border"
    }

    fn priority(&self) -> i32 {
        priority::BORDER
    }

    fn build_zone(&mut self, context: &mut BuildContext<'_>) -> bool {
        let width = context.zone.width() as i32;
        let height = context.zone.height() as i32;
        for y in 0..height {
            for x in 0..width {
                if x == 0 || y == 0 || x == width - 1 || y == height - 1 {
                    context.place(&self.wall_blueprint, Pos { y, x });
                }
            }
        }
        true
    }
}
