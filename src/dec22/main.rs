mod atlas;
mod board;
mod cube;
mod flat;
mod heading;
mod path;

use std::path::PathBuf;

use anyhow::{ensure, Context};
use clap::{Parser, ValueEnum};
use itertools::Itertools;
use tracing::{info, Level};

use atlas::{AtlasConfig, EdgeAtlas};
use board::Board;
use cube::CubeWalker;
use flat::FlatWalker;
use path::Action;

type Result<T> = std::result::Result<T, anyhow::Error>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Net {
    /// Pick from the board's shape
    Auto,
    /// Three faces wide, four tall
    Standard,
    /// Four faces wide, three tall
    Sample,
}

#[derive(Parser, Debug)]
#[command(name = "dec22")]
#[command(about = "Follow the monkeys' path across a flat map, then across the folded cube")]
struct Args {
    /// Puzzle input: the board, a blank line, then the path
    input: PathBuf,

    /// Which cube net the board is laid out as
    #[arg(long, value_enum, default_value_t = Net::Auto)]
    net: Net,

    /// Print the padded board and the path before solving
    #[arg(long)]
    show_map: bool,

    /// More logging on stderr (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn parse_input(s: &str) -> Result<(Board, Vec<Action>)> {
    let s = s.replace("\r\n", "\n");
    ensure!(!s.trim().is_empty(), "empty input");

    let (map, path_line) = s
        .trim_start_matches('\n')
        .split_once("\n\n")
        .context("missing blank line between the board and the path")?;

    let board = Board::from_lines(map.lines()).context("bad board")?;
    let actions = path::parse_path(path_line).context("bad path")?;

    Ok((board, actions))
}

fn atlas_config(net: Net, board: &Board) -> Result<AtlasConfig> {
    let width = board.number_of_columns();
    let height = board.number_of_rows();

    let net = match net {
        Net::Auto if width > height => Net::Sample,
        Net::Auto => Net::Standard,
        other => other,
    };

    let (faces_wide, faces_tall) = match net {
        Net::Sample => (4, 3),
        Net::Standard | Net::Auto => (3, 4),
    };

    let cells = board.face_cell_count();
    let grid_size = ((cells / 6) as f64).sqrt().round() as i32;
    ensure!(
        grid_size > 0 && cells == 6 * (grid_size * grid_size) as usize,
        "{} face cells can't be folded into a cube",
        cells
    );
    ensure!(
        width == grid_size * faces_wide && height == grid_size * faces_tall,
        "{}x{} board doesn't make sense for a net {} faces wide and {} tall",
        width,
        height,
        faces_wide,
        faces_tall
    );

    info!(width, height, faces_wide, faces_tall, grid_size, ?net, "cube net");

    Ok(match net {
        Net::Sample => AtlasConfig::sample(grid_size),
        Net::Standard | Net::Auto => AtlasConfig::standard(grid_size),
    })
}

/// Returns the flat and the cube password.
fn solve(board: &Board, actions: &[Action], config: &AtlasConfig) -> Result<(i64, i64)> {
    let start = board.starting_position()?;
    info!(row = start.0, col = start.1, actions = actions.len(), "starting");

    let (pos, heading) = path::follow(&FlatWalker::new(board), start, actions)?;
    info!(row = pos.0, col = pos.1, ?heading, "flat walk done");
    let flat = path::score(pos, heading);

    let atlas = EdgeAtlas::new(config)?;
    info!(grid_size = atlas.grid_size(), pairs = atlas.pairs().len(), "edge atlas built");
    atlas.validate(board).context("cube net does not match the board")?;

    let (pos, heading) = path::follow(&CubeWalker::new(board, &atlas), start, actions)?;
    info!(row = pos.0, col = pos.1, ?heading, "cube walk done");
    let cube = path::score(pos, heading);

    Ok((flat, cube))
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let buffer = std::fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read puzzle input from {}", args.input.display()))?;

    let (board, actions) = parse_input(&buffer)?;
    info!(
        rows = board.number_of_rows(),
        columns = board.number_of_columns(),
        "board loaded"
    );

    if args.show_map {
        print!("{}", board);
        println!("{}", actions.iter().join(""));
    }

    let config = atlas_config(args.net, &board)?;
    let (flat, cube) = solve(&board, &actions, &config)?;

    println!("Answer part A: {}", flat);
    println!("Answer part B: {}", cube);
    Ok(())
}
