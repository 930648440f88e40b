//! Overlay colors for everything the scene itself does not color
//!
//! Bodies, links and grounds carry their own colors. The canvas background,
//! force arrows, selection markers and labels come from a catppuccin flavor.

use spring_physics::Color;

fn to_color(c: &catppuccin::Color) -> Color {
    Color::from_srgba(c.rgb.r, c.rgb.g, c.rgb.b, 255)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: Color,
    pub force_arrow: Color,
    /// First endpoint of a link being created
    pub link_pending: Color,
    /// Bodies waiting for a force
    pub force_armed: Color,
    pub center_of_mass: Color,
    pub label: Color,
}

impl Palette {
    pub fn from_flavor(flavor: &catppuccin::Flavor) -> Self {
        let colors = &flavor.colors;
        Self {
            background: to_color(&colors.base),
            force_arrow: to_color(&colors.blue),
            link_pending: to_color(&colors.red),
            force_armed: to_color(&colors.sapphire),
            center_of_mass: to_color(&colors.peach),
            label: to_color(&colors.text),
        }
    }

    /// Light canvas
    pub fn latte() -> Self {
        Self::from_flavor(&catppuccin::PALETTE.latte)
    }

    pub fn mocha() -> Self {
        Self::from_flavor(&catppuccin::PALETTE.mocha)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::latte()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flavors_differ_in_background() {
        let latte = Palette::latte();
        let mocha = Palette::mocha();
        assert_ne!(latte.background, mocha.background);
        // latte is a light theme
        assert!(latte.background.r > mocha.background.r);
        assert_eq!(latte.background.a, 1.0);
    }

    #[test]
    fn test_markers_are_distinguishable() {
        let p = Palette::default();
        assert_ne!(p.link_pending, p.force_armed);
        assert_ne!(p.center_of_mass, p.force_arrow);
    }
}
