use clap::{ArgAction, Parser};
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(version, about)]
pub struct Options {
    /// Logging verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    #[arg(
        short,
        long,
        default_value = "0.0.0.0:3000",
        help = "Socket address to listen on (--help for more)",
        long_help = r"Socket address to listen on:
    - incoming http connections are received on this socket
Examples:
    - 127.0.0.1:3000
    - 0.0.0.0:80
    - [2001:db8::1]:8080"
    )]
    pub listen: SocketAddr,

    #[arg(
        short,
        long,
        default_value = "music",
        help = "Directory containing the audio files (--help for more)",
        long_help = r"Directory containing the audio files:
    - the song query parameter is resolved relative to this directory
    - songs may live in subdirectories, but never outside of it
Examples:
    - music
    - /srv/library/mp3"
    )]
    pub root: PathBuf,
}
