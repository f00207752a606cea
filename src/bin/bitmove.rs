// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

#[macro_use]
extern crate clap;
#[macro_use]
extern crate log;

use std::fs::File;
use std::process;
use std::time::Instant;

use bitmove::eval::{BoardEvaluator, MaterialEvaluator};
use bitmove::search::{RandomSearcher, Searcher};
use bitmove::{perft, perft_divide, Position};
use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use serde_derive::Serialize;

#[derive(Serialize)]
struct DivideEntry {
    #[serde(rename = "move")]
    mov: String,
    nodes: u64,
}

#[derive(Serialize)]
struct DivideReport {
    fen: String,
    depth: u32,
    total: u64,
    moves: Vec<DivideEntry>,
}

fn fen_arg() -> Arg<'static, 'static> {
    Arg::with_name("FEN")
        .help("FEN string for a board position")
        .required(true)
        .index(1)
}

fn depth_arg() -> Arg<'static, 'static> {
    Arg::with_name("depth")
        .help("Depth of move tree to search")
        .value_name("DEPTH")
        .short("d")
        .long("depth")
        .takes_value(true)
        .required(true)
}

fn main() {
    env_logger::init();
    let matches = App::new(crate_name!())
        .version(crate_version!())
        .author(crate_authors!())
        .about(crate_description!())
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(
            SubCommand::with_name("perft")
                .about("PERFT analysis of board positions")
                .arg(fen_arg())
                .arg(depth_arg()),
        )
        .subcommand(
            SubCommand::with_name("divide")
                .about("PERFT node counts split by root move")
                .arg(fen_arg())
                .arg(depth_arg())
                .arg(
                    Arg::with_name("json")
                        .help("Also write the counts to this file as JSON")
                        .value_name("FILE")
                        .long("json")
                        .takes_value(true),
                ),
        )
        .subcommand(
            SubCommand::with_name("evaluate")
                .about("Material evaluation and a random legal move")
                .arg(fen_arg()),
        )
        .get_matches();

    match matches.subcommand() {
        ("perft", Some(matches)) => run_perft(matches),
        ("divide", Some(matches)) => run_divide(matches),
        ("evaluate", Some(matches)) => run_evaluate(matches),
        _ => unreachable!(),
    }
}

fn parse_position(matches: &ArgMatches) -> Position {
    let fen = matches.value_of("FEN").unwrap();
    match Position::from_fen(fen) {
        Ok(pos) => pos,
        Err(e) => {
            println!("invalid fen: {}", e);
            process::exit(1);
        }
    }
}

fn run_perft(matches: &ArgMatches) -> ! {
    let mut pos = parse_position(matches);
    let depth = value_t_or_exit!(matches, "depth", u32);
    println!("fen:   {}", pos.as_fen());
    println!("depth: {}", depth);
    println!();
    for i in 1..depth + 1 {
        let start = Instant::now();
        let results = perft(&mut pos, i);
        let duration = start.elapsed();
        println!("perft({}) = {} ({} ms)", i, results, duration.as_millis());
    }

    process::exit(0);
}

fn run_divide(matches: &ArgMatches) -> ! {
    let mut pos = parse_position(matches);
    let depth = value_t_or_exit!(matches, "depth", u32);
    let divided = perft_divide(&mut pos, depth);
    let total: u64 = divided.iter().map(|&(_, nodes)| nodes).sum();
    for &(mov, nodes) in &divided {
        println!("{}: {}", mov, nodes);
    }

    println!();
    println!("moves: {}", divided.len());
    println!("nodes: {}", total);

    if let Some(path) = matches.value_of("json") {
        let report = DivideReport {
            fen: pos.as_fen(),
            depth,
            total,
            moves: divided
                .iter()
                .map(|&(mov, nodes)| DivideEntry {
                    mov: mov.as_uci(),
                    nodes,
                })
                .collect(),
        };

        let written = File::create(path)
            .map_err(|e| e.to_string())
            .and_then(|file| serde_json::to_writer_pretty(file, &report).map_err(|e| e.to_string()));
        match written {
            Ok(()) => info!("wrote divide report to {}", path),
            Err(e) => {
                println!("failed to write {}: {}", path, e);
                process::exit(1);
            }
        }
    }

    process::exit(0);
}

fn run_evaluate(matches: &ArgMatches) -> ! {
    let mut pos = parse_position(matches);
    println!("fen:   {}", pos.as_fen());
    println!("score: {}", MaterialEvaluator::new().evaluate(&pos));

    match RandomSearcher::new().search(&mut pos) {
        Some(result) => {
            println!(" move: {}", result.best_move);
            println!("  of:  {} legal moves", result.candidates);
        }
        None if pos.is_check(pos.side_to_move()) => println!(" move: none (checkmate)"),
        None => println!(" move: none (stalemate)"),
    }

    process::exit(0);
}
