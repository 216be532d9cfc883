use crate::layout::{LabelRole, OverlayLayout};
use crate::render::{ArcPrimitive, LinePrimitive, RenderFrame, TextPrimitive};

use super::DashboardStyle;

/// Converts an overlay into draw commands on top of `frame`.
///
/// Connectors and guides become lines, label backgrounds become discs painted
/// over the lines, and texts come last. Zero-length connector legs are dropped.
pub fn append_overlay(frame: &mut RenderFrame, overlay: &OverlayLayout, style: &DashboardStyle) {
    for guide in &overlay.guides {
        frame.lines.push(LinePrimitive::new(
            guide.from.x,
            guide.from.y,
            guide.to.x,
            guide.to.y,
            style.divider_width_px,
            style.divider_color,
        ));
    }

    for label in &overlay.labels {
        if let Some(connector) = &label.connector {
            for leg in connector.windows(2) {
                let (from, to) = (leg[0], leg[1]);
                if from == to {
                    continue;
                }
                frame.lines.push(LinePrimitive::new(
                    from.x,
                    from.y,
                    to.x,
                    to.y,
                    style.connector_width_px,
                    style.connector_color,
                ));
            }
        }
        if let Some(background) = label.background {
            frame.overlay_arcs.push(ArcPrimitive::disc(
                label.anchor.x,
                label.anchor.y,
                background.radius_px,
                style.label_disc_color,
            ));
        }
        if label.text.is_empty() {
            continue;
        }
        let font_size_px = match label.role {
            LabelRole::Value => style.label_font_size_px,
            LabelRole::Tick => style.tick_font_size_px,
        };
        frame.texts.push(
            TextPrimitive::new(
                label.text.clone(),
                label.anchor.x,
                label.anchor.y,
                font_size_px,
                style.label_color,
                label.h_align,
            )
            .with_bold(label.background.is_some()),
        );
    }
}
