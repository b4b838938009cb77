// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines the digest and cache subcommands and their arguments.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "imgstash")]
#[command(about = "Resolve container image digests and prune the local image cache")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the digest of an image
    Digest {
        /// Image reference, e.g. nginx:1.25
        image: String,

        /// Only ask the local container runtime
        #[arg(long)]
        local_only: bool,
    },

    /// Inspect or prune the image cache
    Cache {
        #[command(subcommand)]
        command: CacheCommands,
    },
}

#[derive(Subcommand)]
pub enum CacheCommands {
    /// Delete cached images, then remove directories left empty
    Delete {
        /// Cache identifiers relative to the cache root
        #[arg(required = true)]
        images: Vec<String>,
    },

    /// List cached images
    List,

    /// Print where an image would be cached
    Path {
        /// Image reference, e.g. registry.k8s.io/pause:3.9
        image: String,
    },
}
