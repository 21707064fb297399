use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use crate::api::AdminResource;
use crate::table::column::resolve_sort_key;
use crate::table::{Column, PageSize, PageState, SortSpec, SortState, TableError};

#[derive(Parser, Debug)]
#[command(name = "perfect-research")]
#[command(about = "Terminal client for the Perfect Research platform: admin tables and document search")]
#[command(version)]
pub struct Cli {
    /// API base URL (overrides PERFECT_RESEARCH_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the interactive terminal client (default)
    Tui,

    /// Log in and store the session token
    Login {
        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,
    },

    /// Remove the stored session
    Logout,

    /// Print one page of an admin resource
    List {
        /// years, universities, countries, disciplines or users
        resource: String,

        #[command(flatten)]
        view: ViewArgs,
    },

    /// Search documents and print one page of results
    Documents {
        query: String,

        #[command(flatten)]
        view: ViewArgs,
    },
}

/// Sort, filter and page flags shared by the printing commands
#[derive(Args, Debug, Clone, Default)]
pub struct ViewArgs {
    /// Column key to sort on
    #[arg(long)]
    pub sort: Option<String>,

    /// Sort descending instead of ascending
    #[arg(long, requires = "sort")]
    pub desc: bool,

    /// Case-insensitive substring filter over every column
    #[arg(long, default_value = "")]
    pub filter: String,

    /// Page number, starting at 1
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Rows per page: 5, 10, 15, 20 or 25
    #[arg(long)]
    pub page_size: Option<usize>,
}

impl ViewArgs {
    pub fn sort_state(&self, columns: &[Column]) -> Result<SortState, TableError> {
        let Some(key) = &self.sort else {
            return Ok(None);
        };
        resolve_sort_key(columns, key)?;
        Ok(Some(if self.desc {
            SortSpec::descending(key)
        } else {
            SortSpec::ascending(key)
        }))
    }

    pub fn page_state(&self, default_size: PageSize) -> Result<PageState, TableError> {
        if self.page == 0 {
            return Err(TableError::InvalidPage(0));
        }
        let page_size = match self.page_size {
            Some(size) => PageSize::try_from(size)?,
            None => default_size,
        };
        Ok(PageState::new(self.page, page_size))
    }
}

impl Commands {
    pub fn parse_resource(s: &str) -> Result<AdminResource> {
        s.parse()
    }

    /// Commands that own the terminal log to the file only
    pub fn is_interactive(&self) -> bool {
        matches!(self, Commands::Tui)
    }
}
