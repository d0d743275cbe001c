//! Overlay color scheme.

use dear_imgui_rs::{ColorOverride, Context, StyleColor, Theme, ThemePreset};

/// Apply the overlay's dark palette and rounding to the context.
///
/// Called once at startup, before the first frame.
// TODO: user-configurable styles
pub fn apply_style(ctx: &mut Context) {
    let border = [0.43, 0.43, 0.50, 0.50];
    let mut theme = Theme::default();
    theme.preset = ThemePreset::None;
    theme.colors = vec![
        ColorOverride {
            id: StyleColor::Text,
            rgba: [1.00, 1.00, 1.00, 1.00],
        },
        ColorOverride {
            id: StyleColor::TextDisabled,
            rgba: [0.50, 0.50, 0.50, 1.00],
        },
        ColorOverride {
            id: StyleColor::WindowBg,
            rgba: [0.13, 0.14, 0.15, 1.00],
        },
        ColorOverride {
            id: StyleColor::ChildBg,
            rgba: [0.13, 0.14, 0.15, 1.00],
        },
        ColorOverride {
            id: StyleColor::PopupBg,
            rgba: [0.13, 0.14, 0.15, 1.00],
        },
        ColorOverride {
            id: StyleColor::Border,
            rgba: border,
        },
        ColorOverride {
            id: StyleColor::BorderShadow,
            rgba: [0.00, 0.00, 0.00, 0.00],
        },
        ColorOverride {
            id: StyleColor::FrameBg,
            rgba: [0.25, 0.25, 0.25, 1.00],
        },
        ColorOverride {
            id: StyleColor::FrameBgHovered,
            rgba: [0.38, 0.38, 0.38, 1.00],
        },
        ColorOverride {
            id: StyleColor::FrameBgActive,
            rgba: [0.67, 0.67, 0.67, 0.39],
        },
        ColorOverride {
            id: StyleColor::TitleBg,
            rgba: [0.08, 0.08, 0.09, 1.00],
        },
        ColorOverride {
            id: StyleColor::TitleBgActive,
            rgba: [0.08, 0.08, 0.09, 1.00],
        },
        ColorOverride {
            id: StyleColor::TitleBgCollapsed,
            rgba: [0.00, 0.00, 0.00, 0.51],
        },
        ColorOverride {
            id: StyleColor::MenuBarBg,
            rgba: [0.14, 0.14, 0.14, 1.00],
        },
        ColorOverride {
            id: StyleColor::ScrollbarBg,
            rgba: [0.02, 0.02, 0.02, 0.53],
        },
        ColorOverride {
            id: StyleColor::ScrollbarGrab,
            rgba: [0.31, 0.31, 0.31, 1.00],
        },
        ColorOverride {
            id: StyleColor::ScrollbarGrabHovered,
            rgba: [0.41, 0.41, 0.41, 1.00],
        },
        ColorOverride {
            id: StyleColor::ScrollbarGrabActive,
            rgba: [0.51, 0.51, 0.51, 1.00],
        },
        ColorOverride {
            id: StyleColor::CheckMark,
            rgba: [0.11, 0.64, 0.92, 1.00],
        },
        ColorOverride {
            id: StyleColor::SliderGrab,
            rgba: [0.11, 0.64, 0.92, 1.00],
        },
        ColorOverride {
            id: StyleColor::SliderGrabActive,
            rgba: [0.08, 0.50, 0.72, 1.00],
        },
        ColorOverride {
            id: StyleColor::Button,
            rgba: [0.25, 0.25, 0.25, 1.00],
        },
        ColorOverride {
            id: StyleColor::ButtonHovered,
            rgba: [0.38, 0.38, 0.38, 1.00],
        },
        ColorOverride {
            id: StyleColor::ButtonActive,
            rgba: [0.67, 0.67, 0.67, 0.39],
        },
        ColorOverride {
            id: StyleColor::Header,
            rgba: [0.22, 0.22, 0.22, 1.00],
        },
        ColorOverride {
            id: StyleColor::HeaderHovered,
            rgba: [0.25, 0.25, 0.25, 1.00],
        },
        ColorOverride {
            id: StyleColor::HeaderActive,
            rgba: [0.67, 0.67, 0.67, 0.39],
        },
        ColorOverride {
            id: StyleColor::Separator,
            rgba: border,
        },
        ColorOverride {
            id: StyleColor::SeparatorHovered,
            rgba: [0.41, 0.42, 0.44, 1.00],
        },
        ColorOverride {
            id: StyleColor::SeparatorActive,
            rgba: [0.26, 0.59, 0.98, 0.95],
        },
        ColorOverride {
            id: StyleColor::ResizeGrip,
            rgba: [0.00, 0.00, 0.00, 0.00],
        },
        ColorOverride {
            id: StyleColor::ResizeGripHovered,
            rgba: [0.29, 0.30, 0.31, 0.67],
        },
        ColorOverride {
            id: StyleColor::ResizeGripActive,
            rgba: [0.26, 0.59, 0.98, 0.95],
        },
        ColorOverride {
            id: StyleColor::Tab,
            rgba: [0.08, 0.08, 0.09, 0.83],
        },
        ColorOverride {
            id: StyleColor::TabHovered,
            rgba: [0.33, 0.34, 0.36, 0.83],
        },
        ColorOverride {
            id: StyleColor::TabSelected,
            rgba: [0.23, 0.23, 0.24, 1.00],
        },
        ColorOverride {
            id: StyleColor::TabDimmed,
            rgba: [0.08, 0.08, 0.09, 1.00],
        },
        ColorOverride {
            id: StyleColor::TabDimmedSelected,
            rgba: [0.13, 0.14, 0.15, 1.00],
        },
        ColorOverride {
            id: StyleColor::PlotLines,
            rgba: [0.61, 0.61, 0.61, 1.00],
        },
        ColorOverride {
            id: StyleColor::PlotLinesHovered,
            rgba: [1.00, 0.43, 0.35, 1.00],
        },
        ColorOverride {
            id: StyleColor::PlotHistogram,
            rgba: [0.90, 0.70, 0.00, 1.00],
        },
        ColorOverride {
            id: StyleColor::PlotHistogramHovered,
            rgba: [1.00, 0.60, 0.00, 1.00],
        },
        ColorOverride {
            id: StyleColor::TextSelectedBg,
            rgba: [0.26, 0.59, 0.98, 0.35],
        },
        ColorOverride {
            id: StyleColor::DragDropTarget,
            rgba: [0.11, 0.64, 0.92, 1.00],
        },
        ColorOverride {
            id: StyleColor::NavCursor,
            rgba: [0.26, 0.59, 0.98, 1.00],
        },
        ColorOverride {
            id: StyleColor::NavWindowingHighlight,
            rgba: [1.00, 1.00, 1.00, 0.70],
        },
        ColorOverride {
            id: StyleColor::NavWindowingDimBg,
            rgba: [0.80, 0.80, 0.80, 0.20],
        },
        ColorOverride {
            id: StyleColor::ModalWindowDimBg,
            rgba: [0.80, 0.80, 0.80, 0.35],
        },
    ];
    theme.style.frame_rounding = Some(2.3);
    theme.style.grab_rounding = Some(2.3);
    theme.apply_to_context(ctx);
}
