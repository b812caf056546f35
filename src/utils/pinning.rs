#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PinSide {
    Left,
    Right,
}

/// Pinned column ids per side, in pin order. A column id is a member of at
/// most one side at any time; a column on neither side is "center".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnPinning {
    left: Vec<&'static str>,
    right: Vec<&'static str>,
}

impl ColumnPinning {
    pub fn pin(&mut self, id: &'static str, side: PinSide) {
        self.unpin(id);
        match side {
            PinSide::Left => self.left.push(id),
            PinSide::Right => self.right.push(id),
        }
    }

    pub fn unpin(&mut self, id: &str) {
        self.left.retain(|c| *c != id);
        self.right.retain(|c| *c != id);
    }

    /// Pin to `side`, or clear to center when already pinned there.
    pub fn toggle(&mut self, id: &'static str, side: PinSide) {
        if self.side(id) == Some(side) {
            self.unpin(id);
        } else {
            self.pin(id, side);
        }
    }

    pub fn side(&self, id: &str) -> Option<PinSide> {
        if self.left.iter().any(|c| *c == id) {
            Some(PinSide::Left)
        } else if self.right.iter().any(|c| *c == id) {
            Some(PinSide::Right)
        } else {
            None
        }
    }

    /// Display order: left pins in pin order, center columns in model order,
    /// right pins in pin order.
    pub fn display_order(&self, model_order: &[&'static str]) -> Vec<&'static str> {
        let mut order = Vec::with_capacity(model_order.len());
        order.extend(self.left.iter().filter(|id| model_order.contains(id)));
        order.extend(model_order.iter().filter(|id| self.side(id).is_none()));
        order.extend(self.right.iter().filter(|id| model_order.contains(id)));
        order
    }
}
