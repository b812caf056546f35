#[allow(unused)]
pub mod arrow {
    pub const UP: &str = "↑";
    pub const DOWN: &str = "↓";
    pub const LEFT: &str = "←";
    pub const RIGHT: &str = "→";
}

#[allow(unused)]
pub mod triangle {
    pub const UP_SMALL: &str = "▴";
    pub const DOWN_SMALL: &str = "▾";

    pub const UP: &str = "▲";
    pub const DOWN: &str = "▼";
}

pub mod pin {
    pub const LEFT: &str = "⇤";
    pub const RIGHT: &str = "⇥";
}
