#[cfg(target_arch = "wasm32")]
fn main() {
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(err) = native::run() {
        eprintln!("heatmap_cli error: {err}");
        std::process::exit(1);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use slider_heatmap::heatmap::{DensityGrid, GridOptions, render_table};
    use slider_heatmap::parse::{BeatmapSummary, accumulate_beatmap};
    use slider_heatmap::trace_slider;
    use std::fs;
    use std::path::PathBuf;

    const USAGE: &str = r#"heatmap_cli (slider-heatmap)

USAGE:
  heatmap_cli <beatmap.osu> [options]
  heatmap_cli slider "<hit-object line>"

OPTIONS:
  --columns <n>      Number of grid columns (default 15)
  --rows <n>         Number of grid rows (default 11)
  --json             Print grid and summary as JSON instead of a table
  -h, --help         Show this help

Set RUST_LOG=debug to see every skipped or traced hit-object.
"#;

    pub fn run() -> Result<(), String> {
        let args: Vec<String> = std::env::args().skip(1).collect();
        let mut args = Args::new(args);

        let Some(first) = args.next() else {
            print_usage();
            return Ok(());
        };

        match first.as_str() {
            "-h" | "--help" | "help" => {
                print_usage();
                Ok(())
            }
            "slider" => cmd_slider(&mut args),
            _ => cmd_heatmap(PathBuf::from(first), &mut args),
        }
    }

    fn print_usage() {
        println!("{USAGE}");
    }

    fn cmd_heatmap(path: PathBuf, args: &mut Args) -> Result<(), String> {
        let mut options = GridOptions::default();
        let mut json = false;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--columns" => options.columns = args.number("--columns")?,
                "--rows" => options.rows = args.number("--rows")?,
                "--json" => json = true,
                "-h" | "--help" => {
                    print_usage();
                    return Ok(());
                }
                other => return Err(format!("unknown option `{other}`\n\n{USAGE}")),
            }
        }

        let text = fs::read_to_string(&path)
            .map_err(|e| format!("read {}: {e}", path.display()))?;
        let mut grid = DensityGrid::new(options).map_err(|e| e.to_string())?;
        let summary = accumulate_beatmap(&text, &mut grid);

        if json {
            let report = Report {
                summary,
                grid: &grid,
            };
            let out = serde_json::to_string_pretty(&report).map_err(|e| format!("json: {e}"))?;
            println!("{out}");
        } else {
            print!("{}", render_table(&grid));
        }

        eprintln!(
            "{}: circles={} sliders={} spinners={} skipped={} points={}",
            path.display(),
            summary.circles,
            summary.sliders,
            summary.spinners,
            summary.skipped,
            summary.points
        );
        Ok(())
    }

    fn cmd_slider(args: &mut Args) -> Result<(), String> {
        let line = args.next().ok_or("missing hit-object line")?;
        let path = trace_slider(&line).map_err(|e| e.to_string())?;
        let out = serde_json::to_string_pretty(&path).map_err(|e| format!("json: {e}"))?;
        println!("{out}");
        Ok(())
    }

    #[derive(serde::Serialize)]
    struct Report<'a> {
        summary: BeatmapSummary,
        grid: &'a DensityGrid,
    }

    struct Args {
        args: Vec<String>,
        pos: usize,
    }

    impl Args {
        fn new(args: Vec<String>) -> Self {
            Self { args, pos: 0 }
        }

        fn next(&mut self) -> Option<String> {
            let arg = self.args.get(self.pos)?.clone();
            self.pos += 1;
            Some(arg)
        }

        fn value(&mut self, flag: &str) -> Result<String, String> {
            self.next()
                .ok_or_else(|| format!("missing value for {flag}"))
        }

        fn number(&mut self, flag: &str) -> Result<usize, String> {
            let raw = self.value(flag)?;
            raw.parse()
                .map_err(|e| format!("invalid value `{raw}` for `{flag}`: {e}"))
        }
    }
}
