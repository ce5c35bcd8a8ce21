use std::io::{IsTerminal, Write};
use std::path::PathBuf;

use activity_heatmap::{
    ActivityHeatmap, Config, FixedMetrics, HeatmapError, HeatmapStyle, MonthLabelStrategy,
    Primitive,
};
use anyhow::{anyhow, Context};
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use crossterm::style::{Color as TermColor, Print, ResetColor, SetForegroundColor};
use crossterm::QueueableCommand;
use ratatui::{buffer::Buffer, layout::Rect, style::Color, widgets::Widget};
use serde::Serialize;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use crate::tui::theme::{to_color, Theme};
use crate::tui::widgets::{heatmap::HeatmapView, legend::Legend};

/// 52-week activity heatmap for the terminal
#[derive(Parser)]
#[command(name = "activity-heatmap")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file (default: ~/.activity-heatmap/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// More log output (repeatable)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Less log output (repeatable)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    quiet: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch interactive TUI (default)
    Tui {
        #[command(flatten)]
        calendar: CalendarArgs,
    },

    /// Print the draw primitives for one frame
    Render {
        /// Surface width in pixels
        #[arg(long, default_value_t = 700)]
        width: u32,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        calendar: CalendarArgs,
    },

    /// Print the terminal rendering
    Preview {
        /// Width in terminal columns
        #[arg(long, default_value_t = 160)]
        columns: u16,

        /// No colors; inactive days drawn as dots
        #[arg(long)]
        plain: bool,

        #[command(flatten)]
        calendar: CalendarArgs,
    },

    /// Show the displayed date range
    Range {
        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Last day of the window (default: today)
        #[arg(long, value_parser = parse_date)]
        today: Option<NaiveDate>,
    },
}

/// Date window and activity options shared by the drawing commands
#[derive(Args, Default)]
struct CalendarArgs {
    /// Last day of the window, YYYY-MM-DD (default: today)
    #[arg(long, value_parser = parse_date)]
    today: Option<NaiveDate>,

    /// Mark a day as active, YYYY-MM-DD (repeatable)
    #[arg(long = "active", value_parser = parse_date)]
    active: Vec<NaiveDate>,

    /// Month label placement
    #[arg(long, value_enum)]
    labels: Option<MonthLabelStrategy>,
}

fn parse_date(s: &str) -> Result<NaiveDate, HeatmapError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| HeatmapError::InvalidDate(s.into()))
}

pub fn init_tracing(verbose: u8, quiet: u8) -> anyhow::Result<()> {
    let default_level = if quiet >= 2 {
        "error"
    } else if quiet == 1 {
        "warn"
    } else if verbose >= 3 {
        "trace"
    } else if verbose == 2 {
        "debug"
    } else if verbose == 1 {
        "info"
    } else {
        "warn"
    };

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| anyhow!("invalid RUST_LOG / log filter: {e}"))?;

    let init_result = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init();

    if let Err(err) = init_result {
        debug!(error = %err, "tracing subscriber already set, continuing");
    }

    Ok(())
}

/// Heatmap for `args`, styled from `defaults` overlaid with the config
fn build_heatmap(config: &Config, defaults: HeatmapStyle, args: &CalendarArgs) -> ActivityHeatmap {
    let mut style = config.style(defaults);
    if let Some(labels) = args.labels {
        style.labels = labels;
    }
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let mut heatmap = ActivityHeatmap::new(today, style);

    for &date in &args.active {
        if !heatmap.set_active(date, true) {
            warn!(
                %date,
                start = %heatmap.range_start(),
                end = %heatmap.range_end(),
                "active date outside window, ignored"
            );
        }
    }
    heatmap
}

/// Defaults for stdout output; never queries the terminal theme
fn pixel_defaults() -> HeatmapStyle {
    HeatmapStyle::default()
}

#[derive(Serialize)]
struct RenderOutput<'a> {
    width: u32,
    height: u32,
    start: NaiveDate,
    end: NaiveDate,
    day_count: usize,
    primitives: &'a [Primitive],
}

fn render_output(
    heatmap: &ActivityHeatmap,
    metrics: &FixedMetrics,
    width: u32,
    json: bool,
) -> anyhow::Result<String> {
    let primitives = heatmap.render(width, metrics);
    let (width, height) = heatmap.preferred_size(width, metrics);

    if json {
        let output = RenderOutput {
            width,
            height,
            start: heatmap.range_start(),
            end: heatmap.range_end(),
            day_count: heatmap.day_count(),
            primitives: &primitives,
        };
        return serde_json::to_string_pretty(&output).context("failed to serialize primitives");
    }

    let mut lines = vec![format!("size {} {}", width, height)];
    lines.extend(primitives.iter().map(ToString::to_string));
    Ok(lines.join("\n"))
}

/// Draw the heatmap and legend into an off-screen buffer
fn preview_buffer(heatmap: &ActivityHeatmap, columns: u16, theme: Theme) -> Buffer {
    let area = Rect::new(0, 0, columns, HeatmapView::HEIGHT + 1);
    let mut buf = Buffer::empty(area);
    let grid = Rect {
        height: HeatmapView::HEIGHT,
        ..area
    };
    HeatmapView::new(heatmap, theme).render(grid, &mut buf);
    let legend = Rect {
        y: HeatmapView::HEIGHT,
        height: 1,
        ..area
    };
    Legend::new(heatmap.style(), theme).render(legend, &mut buf);
    buf
}

/// Plain-text rows: inactive day cells become dots, colors dropped
fn plain_lines(buf: &Buffer, disabled: Color) -> Vec<String> {
    (0..buf.area.height)
        .map(|y| {
            let line: String = (0..buf.area.width)
                .filter_map(|x| buf.cell((x, y)))
                .map(|cell| {
                    if cell.fg == disabled && cell.symbol() == "█" {
                        "·"
                    } else {
                        cell.symbol()
                    }
                })
                .collect();
            line.trim_end().to_string()
        })
        .collect()
}

fn term_color(color: Color) -> Option<TermColor> {
    let color = match color {
        Color::Rgb(r, g, b) => TermColor::Rgb { r, g, b },
        Color::Indexed(i) => TermColor::AnsiValue(i),
        Color::Black => TermColor::Black,
        Color::White => TermColor::White,
        Color::Gray => TermColor::Grey,
        Color::DarkGray => TermColor::DarkGrey,
        Color::Cyan => TermColor::Cyan,
        Color::Yellow => TermColor::Yellow,
        _ => return None,
    };
    Some(color)
}

fn print_colored(buf: &Buffer) -> anyhow::Result<()> {
    let mut out = std::io::stdout().lock();
    for y in 0..buf.area.height {
        for x in 0..buf.area.width {
            let Some(cell) = buf.cell((x, y)) else {
                continue;
            };
            match term_color(cell.fg) {
                Some(color) => out.queue(SetForegroundColor(color))?,
                None => out.queue(ResetColor)?,
            };
            out.queue(Print(cell.symbol()))?;
        }
        out.queue(ResetColor)?;
        out.queue(Print("\n"))?;
    }
    out.flush()?;
    Ok(())
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        init_tracing(self.verbose, self.quiet)?;

        let config = Config::load(self.config.as_deref()).context("failed to load config")?;
        debug!(?config, "configuration resolved");

        match self.command {
            None => run_tui(&config, &CalendarArgs::default()),
            Some(Commands::Tui { calendar }) => run_tui(&config, &calendar),
            Some(Commands::Render {
                width,
                json,
                calendar,
            }) => {
                let heatmap = build_heatmap(&config, pixel_defaults(), &calendar);
                println!("{}", render_output(&heatmap, &config.metrics(), width, json)?);
                Ok(())
            }
            Some(Commands::Preview {
                columns,
                plain,
                calendar,
            }) => {
                let theme = Theme::detect();
                let heatmap = build_heatmap(&config, theme.heatmap_style(), &calendar);
                let buf = preview_buffer(&heatmap, columns, theme);
                if plain {
                    let disabled = to_color(heatmap.style().disabled);
                    for line in plain_lines(&buf, disabled) {
                        println!("{}", line);
                    }
                    Ok(())
                } else {
                    print_colored(&buf)
                }
            }
            Some(Commands::Range { json, today }) => {
                let args = CalendarArgs {
                    today,
                    ..CalendarArgs::default()
                };
                let heatmap = build_heatmap(&config, pixel_defaults(), &args);
                if json {
                    let value = serde_json::json!({
                        "start": heatmap.range_start(),
                        "end": heatmap.range_end(),
                        "day_count": heatmap.day_count(),
                    });
                    println!("{}", serde_json::to_string_pretty(&value)?);
                } else {
                    println!(
                        "{} .. {} ({} days)",
                        heatmap.range_start(),
                        heatmap.range_end(),
                        heatmap.day_count()
                    );
                }
                Ok(())
            }
        }
    }
}

fn run_tui(config: &Config, args: &CalendarArgs) -> anyhow::Result<()> {
    // Detect before raw mode
    let theme = Theme::detect();
    let heatmap = build_heatmap(config, theme.heatmap_style(), args);
    let heatmap = crate::tui::run(heatmap, theme)?;
    info!(
        active = heatmap.calendar().active_count(),
        days = heatmap.day_count(),
        "session finished"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use activity_heatmap::Rgb;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn args(today: NaiveDate, active: Vec<NaiveDate>) -> CalendarArgs {
        CalendarArgs {
            today: Some(today),
            active,
            labels: None,
        }
    }

    // ========== parsing tests ==========

    #[test]
    fn test_cli_parse_no_args() {
        let cli = Cli::try_parse_from(["activity-heatmap"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_cli_parse_render() {
        let cli = Cli::try_parse_from([
            "activity-heatmap",
            "render",
            "--width",
            "900",
            "--json",
            "--today",
            "2024-01-01",
            "--active",
            "2023-12-24",
            "--active",
            "2023-12-25",
            "--labels",
            "every-month",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Render {
                width,
                json,
                calendar,
            }) => {
                assert_eq!(width, 900);
                assert!(json);
                assert_eq!(calendar.today, Some(date(2024, 1, 1)));
                assert_eq!(calendar.active, vec![date(2023, 12, 24), date(2023, 12, 25)]);
                assert_eq!(calendar.labels, Some(MonthLabelStrategy::EveryMonth));
            }
            _ => panic!("expected render command"),
        }
    }

    #[test]
    fn test_cli_parse_render_defaults() {
        let cli = Cli::try_parse_from(["activity-heatmap", "render"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Render {
                width: 700,
                json: false,
                ..
            })
        ));
    }

    #[test]
    fn test_cli_parse_rejects_bad_date() {
        assert!(
            Cli::try_parse_from(["activity-heatmap", "render", "--today", "2024-02-30"]).is_err()
        );
        assert!(
            Cli::try_parse_from(["activity-heatmap", "range", "--today", "yesterday"]).is_err()
        );
    }

    #[test]
    fn test_cli_parse_global_flags() {
        let cli = Cli::try_parse_from([
            "activity-heatmap",
            "range",
            "-vv",
            "--config",
            "/tmp/heatmap.json",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/heatmap.json")));
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date(" 2024-02-29 ").unwrap(), date(2024, 2, 29));
        assert!(matches!(
            parse_date("2023-02-29"),
            Err(HeatmapError::InvalidDate(_))
        ));
    }

    // ========== command tests ==========

    #[test]
    fn test_build_heatmap_marks_active_days_and_skips_outside() {
        let heatmap = build_heatmap(
            &Config::default(),
            HeatmapStyle::default(),
            &args(
                date(2024, 1, 1),
                vec![date(2023, 12, 25), date(2022, 1, 1), date(2024, 1, 1)],
            ),
        );
        assert_eq!(heatmap.calendar().active_count(), 2);
        assert!(heatmap.calendar().is_active(date(2023, 12, 25)));
    }

    #[test]
    fn test_build_heatmap_label_override() {
        let mut cli_args = args(date(2024, 1, 1), Vec::new());
        cli_args.labels = Some(MonthLabelStrategy::Spaced);
        let heatmap = build_heatmap(&Config::default(), HeatmapStyle::default(), &cli_args);
        assert_eq!(heatmap.style().labels, MonthLabelStrategy::Spaced);
    }

    #[test]
    fn test_render_output_json() {
        let heatmap = build_heatmap(
            &Config::default(),
            HeatmapStyle::default(),
            &args(date(2024, 1, 1), vec![date(2023, 1, 9)]),
        );
        let output = render_output(&heatmap, &FixedMetrics::default(), 700, true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["width"], 700);
        assert_eq!(value["height"], 110);
        assert_eq!(value["start"], "2023-01-09");
        assert_eq!(value["day_count"], 358);
        let primitives = value["primitives"].as_array().unwrap();
        let rects: Vec<_> = primitives.iter().filter(|p| p["kind"] == "rect").collect();
        assert_eq!(rects.len(), 358);
        assert_eq!(rects[0]["x0"], 0.0);
        assert_eq!(rects[0]["y0"], 20.0);
        assert_eq!(rects[0]["color"], "#41d83c");
    }

    #[test]
    fn test_render_output_uses_fixed_palette_under_config() {
        let config = Config {
            disabled_color: Some(Rgb::new(1, 2, 3)),
            ..Config::default()
        };
        let heatmap = build_heatmap(
            &config,
            pixel_defaults(),
            &args(date(2024, 1, 1), vec![date(2023, 1, 9)]),
        );
        let output = render_output(&heatmap, &FixedMetrics::default(), 700, false).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert!(lines[1].ends_with("#41d83c"));
        assert!(lines[2].ends_with("#010203"));
        assert!(output
            .lines()
            .filter(|l| l.starts_with("text "))
            .all(|l| l.contains("#586069")));
    }

    #[test]
    fn test_render_output_text() {
        let heatmap = build_heatmap(
            &Config::default(),
            HeatmapStyle::default(),
            &args(date(2024, 1, 1), Vec::new()),
        );
        let output = render_output(&heatmap, &FixedMetrics::default(), 700, false).unwrap();
        let mut lines = output.lines();
        assert_eq!(lines.next(), Some("size 700 110"));
        assert_eq!(lines.next(), Some("rect 0.000 20.000 9.423 29.423 #ececec"));
        assert_eq!(output.lines().filter(|l| l.starts_with("text ")).count(), 6);
    }

    #[test]
    fn test_preview_plain_lines() {
        let heatmap = build_heatmap(
            &Config::default(),
            Theme::Dark.heatmap_style(),
            &args(date(2024, 6, 12), vec![date(2023, 6, 19)]),
        );
        let buf = preview_buffer(&heatmap, 160, Theme::Dark);
        let lines = plain_lines(&buf, to_color(heatmap.style().disabled));

        assert_eq!(lines.len(), 9);
        assert!(lines[1].starts_with("Mon ██ ·· ··"));
        assert!(lines[2].starts_with("Tue ·· ·· ··"));
        assert!(lines[8].ends_with("Inactive ··  Active ██"));
    }
}
