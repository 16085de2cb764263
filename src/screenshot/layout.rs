// Storefront - layout.rs
// Copyright (C) 2025  Storefront contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Size negotiation and painting of a screenshot, expressed as plain
//! values. The widget only has to forward these to the toolkit.

use super::paintable::{PaintableKind, PaintableMetrics};

pub const TOP_HALF_WIDTH: i32 = 650;
pub const TOP_HALF_HEIGHT: i32 = 265;
pub const CORNER_RADIUS: f64 = 10.0;

#[derive(Copy, Debug, Clone, Eq, PartialEq, Default)]
pub enum ScalingFilter {
    Linear,
    Nearest,
    #[default]
    Trilinear,
}

#[derive(Copy, Debug, Clone, Eq, PartialEq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

#[derive(Copy, Debug, Clone, Eq, PartialEq)]
pub enum SizeRequestMode {
    HeightForWidth,
    ConstantSize,
}

/// Display parameters of a screenshot.
#[derive(Copy, Debug, Clone, PartialEq)]
pub struct ScreenshotProps {
    pub focus_x: f64,
    pub focus_y: f64,
    pub rounded_corners: bool,
    pub top_half: bool,
    pub filter: ScalingFilter,
}

impl Default for ScreenshotProps {
    fn default() -> Self {
        Self {
            focus_x: -1.0,
            focus_y: -1.0,
            rounded_corners: true,
            top_half: false,
            filter: ScalingFilter::default(),
        }
    }
}

#[derive(Copy, Debug, Clone, Eq, PartialEq)]
pub struct Measurement {
    pub minimum: i32,
    pub natural: i32,
    pub minimum_baseline: i32,
    pub natural_baseline: i32,
}

impl Measurement {
    pub fn new(minimum: i32, natural: i32) -> Self {
        Self {
            minimum,
            natural,
            minimum_baseline: -1,
            natural_baseline: -1,
        }
    }
}

impl Default for Measurement {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

#[derive(Copy, Debug, Clone, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// A rectangle with the same radius on all four corners.
#[derive(Copy, Debug, Clone, PartialEq)]
pub struct RoundedRect {
    pub bounds: Rect,
    pub radius: f64,
}

/// One step of painting a screenshot.
#[derive(Copy, Debug, Clone, PartialEq)]
pub enum PaintOp {
    PushRoundedClip(RoundedRect),
    PushClip(Rect),
    Translate { x: f64, y: f64 },
    /// Draw the texture of the paintable directly, scaled with `filter`
    AppendScaledTexture {
        filter: ScalingFilter,
        width: f64,
        height: f64,
    },
    /// Let the paintable draw itself
    SnapshotPaintable { width: f64, height: f64 },
    Pop,
}

pub fn request_mode(props: &ScreenshotProps) -> SizeRequestMode {
    if props.top_half {
        SizeRequestMode::ConstantSize
    } else {
        SizeRequestMode::HeightForWidth
    }
}

pub fn measure(
    props: &ScreenshotProps,
    paintable: Option<&PaintableMetrics>,
    orientation: Orientation,
    for_size: i32,
) -> Measurement {
    if props.top_half {
        return match orientation {
            Orientation::Horizontal => Measurement::new(TOP_HALF_WIDTH, TOP_HALF_WIDTH),
            Orientation::Vertical => Measurement::new(TOP_HALF_HEIGHT, TOP_HALF_HEIGHT),
        };
    }

    let Some(paintable) = paintable else {
        return Measurement::default();
    };

    match orientation {
        Orientation::Vertical => {
            if for_size >= 0 && paintable.aspect_ratio > 0.0 {
                let height = (for_size as f64 / paintable.aspect_ratio).ceil();
                let height = (paintable.height as f64).min(height) as i32;
                Measurement::new(height, height)
            } else {
                Measurement::new(0, paintable.height)
            }
        }
        Orientation::Horizontal => Measurement::new(0, paintable.width),
    }
}

/// Position and size of the paintable inside a widget of the given size.
pub fn scaled_geometry(
    top_half: bool,
    aspect_ratio: f64,
    widget_width: i32,
    widget_height: i32,
) -> Rect {
    let widget_width = widget_width as f64;
    let widget_height = widget_height as f64;

    if top_half {
        let width = TOP_HALF_WIDTH as f64;
        let height = if aspect_ratio > 0.0 {
            width / aspect_ratio
        } else {
            widget_height * 2.0
        };

        return Rect::new((widget_width - width) / 2.0, 0.0, width, height);
    }

    let (width, height) = if aspect_ratio > 0.0 {
        let width = widget_width;
        let height = width / aspect_ratio;

        if height > widget_height {
            (widget_height * aspect_ratio, widget_height)
        } else {
            (width, height)
        }
    } else {
        (widget_width, widget_height)
    };

    Rect::new(
        (widget_width - width) / 2.0,
        (widget_height - height) / 2.0,
        width,
        height,
    )
}

/// Builds the list of operations which draw `paintable` into a widget of
/// the given size. Pushed clips are always balanced by a `Pop`.
pub fn paint_plan(
    props: &ScreenshotProps,
    paintable: &PaintableMetrics,
    widget_width: i32,
    widget_height: i32,
) -> Vec<PaintOp> {
    let scaled = scaled_geometry(
        props.top_half,
        paintable.aspect_ratio,
        widget_width,
        widget_height,
    );
    let widget = Rect::new(0.0, 0.0, widget_width as f64, widget_height as f64);
    let mut ops = Vec::with_capacity(6);
    let mut pushed = 0;

    if props.rounded_corners {
        if props.top_half {
            ops.push(PaintOp::PushRoundedClip(RoundedRect {
                bounds: scaled,
                radius: CORNER_RADIUS,
            }));
            ops.push(PaintOp::PushClip(widget));
            pushed = 2;
        } else {
            ops.push(PaintOp::PushRoundedClip(RoundedRect {
                bounds: widget,
                radius: CORNER_RADIUS,
            }));
            pushed = 1;
        }
    }

    ops.push(PaintOp::Translate {
        x: scaled.x,
        y: scaled.y,
    });

    // Only the two texture variants can take the nearest-neighbor path,
    // every other paintable gets drawn with its own (smooth) scaling.
    if props.filter == ScalingFilter::Nearest && paintable.kind.is_texture() {
        ops.push(PaintOp::AppendScaledTexture {
            filter: props.filter,
            width: scaled.width,
            height: scaled.height,
        });
    } else {
        ops.push(PaintOp::SnapshotPaintable {
            width: scaled.width,
            height: scaled.height,
        });
    }

    ops.extend(std::iter::repeat(PaintOp::Pop).take(pushed));
    ops
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(width: i32, height: i32, kind: PaintableKind) -> PaintableMetrics {
        PaintableMetrics {
            width,
            height,
            aspect_ratio: width as f64 / height as f64,
            kind,
        }
    }

    #[test]
    fn height_for_width_keeps_aspect() {
        let props = ScreenshotProps::default();
        let paintable = metrics(1000, 500, PaintableKind::Generic);

        let m = measure(&props, Some(&paintable), Orientation::Vertical, 200);
        assert_eq!(m.minimum, 100);
        assert_eq!(m.natural, 100);
        assert_eq!(m.minimum_baseline, -1);
    }

    #[test]
    fn height_for_width_is_clamped_to_intrinsic_height() {
        let props = ScreenshotProps::default();
        let paintable = metrics(100, 50, PaintableKind::Generic);

        let m = measure(&props, Some(&paintable), Orientation::Vertical, 200);
        assert_eq!(m, Measurement::new(50, 50));

        // Odd widths round the height up
        let paintable = metrics(1000, 500, PaintableKind::Generic);
        let m = measure(&props, Some(&paintable), Orientation::Vertical, 201);
        assert_eq!(m.natural, 101);
    }

    #[test]
    fn unconstrained_measure_uses_intrinsic_size() {
        let props = ScreenshotProps::default();
        let paintable = metrics(640, 480, PaintableKind::Generic);

        assert_eq!(
            measure(&props, Some(&paintable), Orientation::Vertical, -1),
            Measurement::new(0, 480)
        );
        assert_eq!(
            measure(&props, Some(&paintable), Orientation::Horizontal, -1),
            Measurement::new(0, 640)
        );

        let no_aspect = PaintableMetrics {
            width: 0,
            height: 30,
            aspect_ratio: 0.0,
            kind: PaintableKind::Generic,
        };
        assert_eq!(
            measure(&props, Some(&no_aspect), Orientation::Vertical, 100),
            Measurement::new(0, 30)
        );
    }

    #[test]
    fn empty_screenshot_has_no_size() {
        let props = ScreenshotProps::default();
        assert_eq!(
            measure(&props, None, Orientation::Vertical, 100),
            Measurement::default()
        );
        assert_eq!(request_mode(&props), SizeRequestMode::HeightForWidth);
    }

    #[test]
    fn top_half_has_fixed_size() {
        let props = ScreenshotProps {
            top_half: true,
            ..Default::default()
        };
        let paintable = metrics(4000, 3000, PaintableKind::Texture);

        for p in [None, Some(&paintable)] {
            for for_size in [-1, 0, 300, 5000] {
                assert_eq!(
                    measure(&props, p, Orientation::Horizontal, for_size),
                    Measurement::new(650, 650)
                );
                assert_eq!(
                    measure(&props, p, Orientation::Vertical, for_size),
                    Measurement::new(265, 265)
                );
            }
        }
        assert_eq!(request_mode(&props), SizeRequestMode::ConstantSize);
    }

    #[test]
    fn geometry_letterboxes() {
        // Wide image in a square widget: bars on top and bottom
        let rect = scaled_geometry(false, 2.0, 200, 200);
        assert_eq!(rect, Rect::new(0.0, 50.0, 200.0, 100.0));

        // Tall image: bars left and right
        let rect = scaled_geometry(false, 0.5, 200, 200);
        assert_eq!(rect, Rect::new(50.0, 0.0, 100.0, 200.0));

        // No aspect ratio: fill the widget
        let rect = scaled_geometry(false, 0.0, 120, 80);
        assert_eq!(rect, Rect::new(0.0, 0.0, 120.0, 80.0));
    }

    #[test]
    fn geometry_top_half() {
        let rect = scaled_geometry(true, 2.0, 850, 265);
        assert_eq!(rect, Rect::new(100.0, 0.0, 650.0, 325.0));

        let rect = scaled_geometry(true, 0.0, 650, 265);
        assert_eq!(rect, Rect::new(0.0, 0.0, 650.0, 530.0));
    }

    #[test]
    fn plan_with_rounded_corners() {
        let props = ScreenshotProps::default();
        let paintable = metrics(400, 200, PaintableKind::Generic);

        let ops = paint_plan(&props, &paintable, 200, 200);
        assert_eq!(
            ops,
            vec![
                PaintOp::PushRoundedClip(RoundedRect {
                    bounds: Rect::new(0.0, 0.0, 200.0, 200.0),
                    radius: 10.0,
                }),
                PaintOp::Translate { x: 0.0, y: 50.0 },
                PaintOp::SnapshotPaintable {
                    width: 200.0,
                    height: 100.0
                },
                PaintOp::Pop,
            ]
        );
    }

    #[test]
    fn plan_top_half_clips_twice() {
        let props = ScreenshotProps {
            top_half: true,
            ..Default::default()
        };
        let paintable = metrics(1300, 650, PaintableKind::Generic);

        let ops = paint_plan(&props, &paintable, 650, 265);
        assert_eq!(
            ops[0],
            PaintOp::PushRoundedClip(RoundedRect {
                bounds: Rect::new(0.0, 0.0, 650.0, 325.0),
                radius: 10.0,
            })
        );
        assert_eq!(ops[1], PaintOp::PushClip(Rect::new(0.0, 0.0, 650.0, 265.0)));
        assert_eq!(&ops[ops.len() - 2..], &[PaintOp::Pop, PaintOp::Pop]);
    }

    #[test]
    fn plan_without_rounded_corners_pushes_nothing() {
        let props = ScreenshotProps {
            rounded_corners: false,
            ..Default::default()
        };
        let paintable = metrics(100, 100, PaintableKind::Generic);

        let ops = paint_plan(&props, &paintable, 100, 100);
        assert!(!ops.iter().any(|op| matches!(
            op,
            PaintOp::PushClip(_) | PaintOp::PushRoundedClip(_) | PaintOp::Pop
        )));
    }

    #[test]
    fn nearest_filter_only_for_textures() {
        let props = ScreenshotProps {
            filter: ScalingFilter::Nearest,
            rounded_corners: false,
            ..Default::default()
        };

        for kind in [PaintableKind::Texture, PaintableKind::AsyncTexture] {
            let ops = paint_plan(&props, &metrics(10, 10, kind), 100, 100);
            assert_eq!(
                ops[1],
                PaintOp::AppendScaledTexture {
                    filter: ScalingFilter::Nearest,
                    width: 100.0,
                    height: 100.0
                }
            );
        }

        let ops = paint_plan(&props, &metrics(10, 10, PaintableKind::Generic), 100, 100);
        assert!(matches!(ops[1], PaintOp::SnapshotPaintable { .. }));

        let smooth = ScreenshotProps {
            filter: ScalingFilter::Linear,
            ..props
        };
        let ops = paint_plan(&smooth, &metrics(10, 10, PaintableKind::Texture), 100, 100);
        assert!(matches!(ops[1], PaintOp::SnapshotPaintable { .. }));
    }
}
