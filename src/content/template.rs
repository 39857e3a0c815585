//! Runtime templates: color grids decoded from legend rows or PNG files,
//! and the binding tables that map their colors to prop blueprints.

use bevy::prelude::*;
use image::RgbaImage;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use super::data::{PropBlueprint, PropDef, PuzzleDifficulty};

/// Exact RGBA8 color used to bind template pixels to props.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct PropColor(pub [u8; 4]);

impl PropColor {
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self([r, g, b, a])
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b, 255])
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA`; alpha defaults to opaque.
    pub fn parse_hex(text: &str) -> Result<Self, String> {
        let digits = text
            .strip_prefix('#')
            .ok_or_else(|| format!("color '{text}' must start with '#'"))?;
        if !(digits.len() == 6 || digits.len() == 8) || !digits.is_ascii() {
            return Err(format!("color '{text}' must be #RRGGBB or #RRGGBBAA"));
        }

        let mut channels = [255u8; 4];
        for (index, channel) in channels.iter_mut().enumerate().take(digits.len() / 2) {
            let pair = &digits[index * 2..index * 2 + 2];
            *channel = u8::from_str_radix(pair, 16)
                .map_err(|_| format!("color '{text}' has invalid hex digits '{pair}'"))?;
        }
        Ok(Self(channels))
    }

    pub fn to_color(self) -> Color {
        let [r, g, b, a] = self.0;
        Color::srgba_u8(r, g, b, a)
    }
}

impl fmt::Display for PropColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b, a] = self.0;
        write!(f, "#{r:02X}{g:02X}{b:02X}{a:02X}")
    }
}

impl TryFrom<String> for PropColor {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse_hex(&value)
    }
}

impl From<PropColor> for String {
    fn from(value: PropColor) -> Self {
        value.to_string()
    }
}

/// A W x H color grid. Pixel (0, 0) is the bottom-left cell of the room.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    pub id: String,
    width: u32,
    height: u32,
    pixels: Vec<PropColor>,
}

impl Template {
    /// `pixels` is row-major with y = 0 at the bottom.
    pub fn new(
        id: impl Into<String>,
        width: u32,
        height: u32,
        pixels: Vec<PropColor>,
    ) -> Result<Self, String> {
        let id = id.into();
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(format!(
                "template '{id}' is {width}x{height} but has {} pixels",
                pixels.len()
            ));
        }
        Ok(Self {
            id,
            width,
            height,
            pixels,
        })
    }

    /// Build from legend rows written top row first.
    pub fn from_rows(
        id: impl Into<String>,
        legend: &BTreeMap<char, PropColor>,
        rows: &[String],
    ) -> Result<Self, String> {
        let id = id.into();
        let width = rows.first().map(|row| row.chars().count()).unwrap_or(0);
        let mut pixels = Vec::with_capacity(width * rows.len());

        for (row_index, row) in rows.iter().rev().enumerate() {
            if row.chars().count() != width {
                return Err(format!(
                    "template '{id}' row {} has {} cells, expected {width}",
                    rows.len() - 1 - row_index,
                    row.chars().count()
                ));
            }
            for symbol in row.chars() {
                let color = legend.get(&symbol).ok_or_else(|| {
                    format!("template '{id}' uses '{symbol}' which is not in the legend")
                })?;
                pixels.push(*color);
            }
        }

        Self::new(id, width as u32, rows.len() as u32, pixels)
    }

    /// Image rows run top to bottom; the grid is flipped so y = 0 is the bottom row.
    pub fn from_image(id: impl Into<String>, image: &RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        for y in (0..height).rev() {
            for x in 0..width {
                pixels.push(PropColor(image.get_pixel(x, y).0));
            }
        }
        Self {
            id: id.into(),
            width,
            height,
            pixels,
        }
    }

    pub fn load_png(id: impl Into<String>, path: &Path) -> Result<Self, String> {
        let image = image::open(path)
            .map_err(|e| format!("failed to read {}: {e}", path.display()))?
            .to_rgba8();
        Ok(Self::from_image(id, &image))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<PropColor> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Pixels in decode order: y outer, x inner.
    pub fn pixels(&self) -> impl Iterator<Item = (u32, u32, PropColor)> + '_ {
        let width = self.width.max(1);
        self.pixels
            .iter()
            .enumerate()
            .map(move |(index, color)| (index as u32 % width, index as u32 / width, *color))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropBinding {
    pub name: String,
    pub color: PropColor,
    pub blueprint: PropBlueprint,
}

impl From<PropDef> for PropBinding {
    fn from(def: PropDef) -> Self {
        Self {
            name: def.name,
            color: def.color,
            blueprint: def.blueprint,
        }
    }
}

/// Ordered list of bindings; order decides which binding wins under first-match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BindingTable {
    bindings: Vec<PropBinding>,
}

impl BindingTable {
    pub fn new(bindings: Vec<PropBinding>) -> Self {
        Self { bindings }
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PropBinding> {
        self.bindings.iter()
    }

    /// Bindings whose color equals `color` on all four channels, in table order.
    pub fn matching(&self, color: PropColor) -> impl Iterator<Item = &PropBinding> {
        self.bindings
            .iter()
            .filter(move |binding| binding.color == color)
    }
}

/// One pool of templates plus the bindings used to decode them.
#[derive(Debug, Clone, Default)]
pub struct TemplateSet {
    pub templates: Vec<Template>,
    pub bindings: BindingTable,
}

impl TemplateSet {
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct PuzzleTemplateSet {
    pub set: TemplateSet,
    pub difficulty: PuzzleDifficulty,
    pub time_limit: f32,
}
