use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, DashboardResult};
use crate::render::Color;

/// Colors and type sizes shared by every chart scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardStyle {
    /// Below, in, above, very high.
    pub time_in_range_colors: [Color; 4],
    /// Optimal, suboptimal, poor.
    pub gmi_colors: [Color; 3],
    /// One per glucose scale band, low to high.
    pub scale_colors: [Color; 5],
    pub empty_color: Color,
    pub label_color: Color,
    pub divider_color: Color,
    pub connector_color: Color,
    pub label_disc_color: Color,
    pub label_font_size_px: f64,
    pub tick_font_size_px: f64,
    pub connector_width_px: f64,
    pub divider_width_px: f64,
}

impl Default for DashboardStyle {
    fn default() -> Self {
        Self {
            time_in_range_colors: [
                Color::from_hex(0xd32f2f),
                Color::from_hex(0x43a047),
                Color::from_hex(0xfbc02d),
                Color::from_hex(0xef6c00),
            ],
            gmi_colors: [
                Color::from_hex(0x43a047),
                Color::from_hex(0xfbc02d),
                Color::from_hex(0xd32f2f),
            ],
            scale_colors: [
                Color::from_hex(0xb71c1c),
                Color::from_hex(0xe57373),
                Color::from_hex(0x66bb6a),
                Color::from_hex(0xffd54f),
                Color::from_hex(0xfb8c00),
            ],
            empty_color: Color::from_hex(0xe0e0e0),
            label_color: Color::from_hex(0x263238),
            divider_color: Color::rgb(1.0, 1.0, 1.0),
            connector_color: Color::from_hex(0x78909c),
            label_disc_color: Color::rgb(1.0, 1.0, 1.0),
            label_font_size_px: 12.0,
            tick_font_size_px: 10.0,
            connector_width_px: 1.0,
            divider_width_px: 2.0,
        }
    }
}

impl DashboardStyle {
    /// Rejects colors outside `[0, 1]` and non-positive font sizes or stroke widths.
    pub fn validate(&self) -> DashboardResult<()> {
        let named_colors = [
            self.empty_color,
            self.label_color,
            self.divider_color,
            self.connector_color,
            self.label_disc_color,
        ];
        for color in self
            .time_in_range_colors
            .iter()
            .chain(&self.gmi_colors)
            .chain(&self.scale_colors)
            .chain(&named_colors)
        {
            color.validate()?;
        }

        let positive = [
            ("label_font_size_px", self.label_font_size_px),
            ("tick_font_size_px", self.tick_font_size_px),
            ("connector_width_px", self.connector_width_px),
            ("divider_width_px", self.divider_width_px),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(DashboardError::InvalidData(format!(
                    "style value `{name}` must be finite and > 0"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::DashboardStyle;
    use crate::render::Color;

    #[test]
    fn default_style_is_valid() {
        DashboardStyle::default().validate().expect("defaults validate");
    }

    #[test]
    fn out_of_range_label_color_is_rejected() {
        let style = DashboardStyle {
            label_color: Color::rgb(3.0, 0.0, 0.0),
            ..DashboardStyle::default()
        };
        assert!(style.validate().is_err());
    }

    #[test]
    fn non_positive_sizes_are_rejected() {
        for style in [
            DashboardStyle { connector_width_px: 0.0, ..DashboardStyle::default() },
            DashboardStyle { divider_width_px: -1.0, ..DashboardStyle::default() },
            DashboardStyle { label_font_size_px: f64::NAN, ..DashboardStyle::default() },
            DashboardStyle { tick_font_size_px: 0.0, ..DashboardStyle::default() },
        ] {
            assert!(style.validate().is_err(), "{style:?}");
        }
    }
}
