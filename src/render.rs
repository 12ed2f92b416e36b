use crate::grid::Position;
use crate::item::ItemKind;
use crate::session::GameSession;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CellColor {
    Black,
    Blue,
    Red,
    Green,
}

impl From<ItemKind> for CellColor {
    fn from(kind: ItemKind) -> Self {
        match kind {
            ItemKind::Cherry => CellColor::Red,
            ItemKind::Poison => CellColor::Black,
            ItemKind::Shrink => CellColor::Green,
        }
    }
}

pub const SNAKE_HEAD_COLOR: CellColor = CellColor::Black;
pub const SNAKE_BODY_COLOR: CellColor = CellColor::Blue;

/// Anything that can paint a whole grid cell in one colour.
pub trait CellCanvas {
    fn fill_cell(&mut self, pos: Position, color: CellColor);
}

/// Paints the snake and then the items. The canvas is expected to start blank.
pub fn draw_session<C: CellCanvas>(session: &GameSession, canvas: &mut C) {
    for (i, pos) in session.snake().body().iter().enumerate() {
        let color = if i == 0 { SNAKE_HEAD_COLOR } else { SNAKE_BODY_COLOR };
        canvas.fill_cell(*pos, color);
    }

    for item in session.items() {
        canvas.fill_cell(item.position(), item.kind().into());
    }
}
