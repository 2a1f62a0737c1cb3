use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};
use yew::prelude::*;

use crate::format::format_currency;
use crate::models::CategorySpending;

const SIDE_GAP: f64 = 20.0;
const BASELINE_INSET: f64 = 30.0;
const LABEL_BAND: f64 = 60.0;

pub struct Bar {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color: String,
    pub label: String,
    pub value: f64,
}

/// Lays the series out as vertical bars. Heights scale linearly against the
/// largest value; the band below the baseline is reserved for labels.
pub fn layout_bars(series: &[CategorySpending], canvas_width: f64, canvas_height: f64) -> Vec<Bar> {
    if series.is_empty() {
        return Vec::new();
    }
    let max_value = series.iter().map(|s| s.amount).fold(0.0f64, f64::max);
    let bar_width = canvas_width / series.len() as f64 - SIDE_GAP;
    let max_height = canvas_height - LABEL_BAND;
    series
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let height = if max_value > 0.0 {
                item.amount / max_value * max_height
            } else {
                0.0
            };
            Bar {
                x: index as f64 * (bar_width + SIDE_GAP) + SIDE_GAP / 2.0,
                y: canvas_height - height - BASELINE_INSET,
                width: bar_width,
                height,
                color: bar_color(index),
                label: item.category.clone(),
                value: item.amount,
            }
        })
        .collect()
}

/// Walks the hue wheel in 60 degree steps so adjacent bars stay distinct.
pub fn bar_color(index: usize) -> String {
    format!("hsl({}, 70%, 60%)", index * 60)
}

#[derive(Properties, PartialEq)]
pub struct SpendingChartProps {
    pub series: Vec<CategorySpending>,
    #[prop_or(640)]
    pub width: u32,
    #[prop_or(280)]
    pub height: u32,
}

/// Per-category spending as a canvas bar chart. Redraws whenever the series
/// changes; an empty series renders a centered placeholder message.
#[function_component(SpendingChart)]
pub fn spending_chart(props: &SpendingChartProps) -> Html {
    let canvas_ref = use_node_ref();

    {
        let canvas_ref = canvas_ref.clone();
        use_effect_with_deps(
            move |series: &Vec<CategorySpending>| {
                if let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() {
                    draw(&canvas, series);
                }
                || ()
            },
            props.series.clone(),
        );
    }

    html! {
        <canvas
            ref={canvas_ref}
            width={props.width.to_string()}
            height={props.height.to_string()}
            class="w-full"
        />
    }
}

fn draw(canvas: &HtmlCanvasElement, series: &[CategorySpending]) {
    let ctx = match canvas.get_context("2d") {
        Ok(Some(ctx)) => match ctx.dyn_into::<CanvasRenderingContext2d>() {
            Ok(ctx) => ctx,
            Err(_) => return,
        },
        _ => return,
    };
    let width = canvas.width() as f64;
    let height = canvas.height() as f64;
    ctx.clear_rect(0.0, 0.0, width, height);

    if series.is_empty() {
        ctx.set_fill_style_str("#64748b");
        ctx.set_font("16px sans-serif");
        ctx.set_text_align("center");
        let _ = ctx.fill_text("No spending data available", width / 2.0, height / 2.0);
        return;
    }

    for bar in layout_bars(series, width, height) {
        ctx.set_fill_style_str(&bar.color);
        ctx.fill_rect(bar.x, bar.y, bar.width, bar.height);

        ctx.set_fill_style_str("#334155");
        ctx.set_font("12px sans-serif");
        ctx.set_text_align("center");
        let center = bar.x + bar.width / 2.0;
        let _ = ctx.fill_text(&bar.label, center, height - 10.0);
        let _ = ctx.fill_text(&format_currency(bar.value), center, bar.y - 5.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(values: &[(&str, f64)]) -> Vec<CategorySpending> {
        values
            .iter()
            .map(|(category, amount)| CategorySpending {
                category: category.to_string(),
                amount: *amount,
            })
            .collect()
    }

    #[test]
    fn test_empty_series_yields_no_bars() {
        assert!(layout_bars(&[], 640.0, 280.0).is_empty());
    }

    #[test]
    fn test_heights_scale_against_the_maximum() {
        let bars = layout_bars(&series(&[("Food", 50.0), ("Bills", 100.0)]), 640.0, 280.0);
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[1].height, 280.0 - LABEL_BAND);
        assert!((bars[0].height - bars[1].height / 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_bars_sit_on_a_common_baseline() {
        let bars = layout_bars(
            &series(&[("Food", 30.0), ("Bills", 90.0), ("Fun", 60.0)]),
            600.0,
            280.0,
        );
        for bar in &bars {
            assert!((bar.y + bar.height - (280.0 - BASELINE_INSET)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_bars_do_not_overlap_and_fit_the_canvas() {
        let bars = layout_bars(
            &series(&[("A", 10.0), ("B", 20.0), ("C", 30.0), ("D", 40.0)]),
            640.0,
            280.0,
        );
        for pair in bars.windows(2) {
            assert!(pair[0].x + pair[0].width <= pair[1].x);
        }
        let last = bars.last().unwrap();
        assert!(last.x + last.width <= 640.0);
    }

    #[test]
    fn test_all_zero_series_draws_flat_bars() {
        let bars = layout_bars(&series(&[("Food", 0.0), ("Bills", 0.0)]), 640.0, 280.0);
        assert!(bars.iter().all(|b| b.height == 0.0));
        assert!(bars.iter().all(|b| b.y == 280.0 - BASELINE_INSET));
    }

    #[test]
    fn test_colors_step_around_the_hue_wheel() {
        assert_eq!(bar_color(0), "hsl(0, 70%, 60%)");
        assert_eq!(bar_color(1), "hsl(60, 70%, 60%)");
        assert_eq!(bar_color(6), "hsl(360, 70%, 60%)");
    }
}
