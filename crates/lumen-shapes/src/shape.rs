//! Shape identifiers and density variants

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A target shape the particles can form
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    /// Sphere with a height gradient
    Planet,
    Heart,
    Star,
    Torus,
    /// Rasterized string
    Text(String),
    /// Heart pierced by an arrow
    ArrowHeart,
}

/// Fieldless shape tag, used as the dispatch key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Planet = 0,
    Heart = 1,
    Star = 2,
    Torus = 3,
    Text = 4,
    ArrowHeart = 5,
}

impl Shape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Planet => ShapeKind::Planet,
            Shape::Heart => ShapeKind::Heart,
            Shape::Star => ShapeKind::Star,
            Shape::Torus => ShapeKind::Torus,
            Shape::Text(_) => ShapeKind::Text,
            Shape::ArrowHeart => ShapeKind::ArrowHeart,
        }
    }

    /// The string to rasterize, for text shapes
    pub fn text(&self) -> Option<&str> {
        match self {
            Shape::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Planet => write!(f, "planet"),
            Shape::Heart => write!(f, "heart"),
            Shape::Star => write!(f, "star"),
            Shape::Torus => write!(f, "torus"),
            Shape::Text(s) => write!(f, "text:{s}"),
            Shape::ArrowHeart => write!(f, "arrow_heart"),
        }
    }
}

impl FromStr for Shape {
    type Err = String;

    /// Accepts `planet`, `sphere`, `heart`, `star`, `torus`, `arrow_heart`
    /// (or `arrow-heart`) and `text:<string>`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(text) = s.strip_prefix("text:") {
            return Ok(Shape::Text(text.to_string()));
        }
        match s.to_ascii_lowercase().as_str() {
            "planet" | "sphere" => Ok(Shape::Planet),
            "heart" => Ok(Shape::Heart),
            "star" => Ok(Shape::Star),
            "torus" => Ok(Shape::Torus),
            "arrow_heart" | "arrow-heart" => Ok(Shape::ArrowHeart),
            other => Err(format!(
                "unknown shape '{other}'; valid values: planet, heart, star, torus, arrow_heart, text:<string>"
            )),
        }
    }
}

/// Where generated points are concentrated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Density {
    /// Boundary-biased; keeps outlines legible with few particles
    Surface,
    /// Interior-filling; gives a solid look with many particles
    Volume,
}

impl Density {
    /// Surface below `volume_threshold` particles, volume at or above it
    pub fn for_count(count: usize, volume_threshold: usize) -> Self {
        if count < volume_threshold {
            Density::Surface
        } else {
            Density::Volume
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_names_and_text() {
        assert_eq!("sphere".parse::<Shape>().unwrap(), Shape::Planet);
        assert_eq!("arrow-heart".parse::<Shape>().unwrap(), Shape::ArrowHeart);
        assert_eq!(
            "text:Hi there".parse::<Shape>().unwrap(),
            Shape::Text("Hi there".into())
        );
        assert!("cube".parse::<Shape>().is_err());
    }

    #[test]
    fn display_round_trips() {
        for shape in [Shape::Planet, Shape::Star, Shape::Text("AB".into())] {
            assert_eq!(shape.to_string().parse::<Shape>().unwrap(), shape);
        }
    }

    #[test]
    fn deserialize_from_toml() {
        #[derive(Deserialize)]
        struct Holder {
            a: Shape,
            b: Shape,
        }
        let h: Holder = toml::from_str("a = \"torus\"\nb = { text = \"HI\" }").unwrap();
        assert_eq!(h.a, Shape::Torus);
        assert_eq!(h.b, Shape::Text("HI".into()));
    }

    #[test]
    fn density_threshold() {
        assert_eq!(Density::for_count(500, 2000), Density::Surface);
        assert_eq!(Density::for_count(2000, 2000), Density::Volume);
    }
}
