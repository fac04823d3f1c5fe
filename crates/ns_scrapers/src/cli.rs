use std::fmt::Write as _;
use std::path::PathBuf;
use std::str::FromStr;
use clap::{Args, Subcommand};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWriteExt};
use ns_core::{ArticleSummary, PdfSummary, Result, Summary};
use crate::manager::{PdfMode, SummaryManager};
use crate::scrapers::web::DEFAULT_MAX_ARTICLES;

pub const INVALID_CHOICE: &str = "Invalid choice. Please enter either 'url', 'homepage', or 'pdf'.";
const RULE_WIDTH: usize = 80;

#[derive(Args, Debug, Clone)]
pub struct SummarizeArgs {
    #[command(subcommand)]
    pub command: SummarizeCommands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum SummarizeCommands {
    /// Summarize a single article
    Url {
        url: String,
    },
    /// Summarize the articles linked from a news homepage
    Homepage {
        url: String,
        #[arg(long, default_value_t = DEFAULT_MAX_ARTICLES)]
        max_articles: usize,
    },
    /// Summarize a PDF file
    Pdf {
        path: PathBuf,
        /// Summarize each headline section separately
        #[arg(long)]
        structured: bool,
    },
}

/// Source kinds offered by the interactive prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Url,
    Homepage,
    Pdf,
}

impl FromStr for Choice {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "url" => Ok(Self::Url),
            "homepage" => Ok(Self::Homepage),
            "pdf" => Ok(Self::Pdf),
            _ => Err(INVALID_CHOICE.to_string()),
        }
    }
}

pub fn render_summary(summary: &Summary) -> String {
    format!("📄 Final Summary:\n\n{}", summary)
}

pub fn render_homepage(groups: &[ArticleSummary]) -> String {
    if groups.is_empty() {
        return "❌ No articles found or failed to load.\n".to_string();
    }
    let mut out = String::new();
    for (i, group) in groups.iter().enumerate() {
        let _ = writeln!(out, "\n📰 Article {}: {}", i + 1, group.title);
        let _ = write!(out, "{}", group.summary);
        let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));
    }
    out
}

pub fn render_pdf(result: &PdfSummary) -> String {
    match result {
        PdfSummary::Full { summary, fell_back } => {
            let mut out = String::new();
            if *fell_back {
                out.push_str("⚠️ No headlines found, summarized the whole document.\n\n");
            }
            out.push_str(&render_summary(summary));
            out
        }
        PdfSummary::Sections { sections } => {
            let mut out = String::new();
            for section in sections {
                let _ = writeln!(out, "\n🗞️ {}", section.headline);
                let _ = write!(out, "{}", section.summary);
                let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));
            }
            out
        }
    }
}

pub async fn handle_command(command: SummarizeCommands, manager: &SummaryManager) -> Result<()> {
    let output = match command {
        SummarizeCommands::Url { url } => {
            println!("\n📝 Downloading article...\n");
            render_summary(&manager.summarize_url(&url).await?)
        }
        SummarizeCommands::Homepage { url, max_articles } => {
            render_homepage(&manager.summarize_homepage(&url, max_articles).await?)
        }
        SummarizeCommands::Pdf { path, structured } => {
            println!("\n📄 Reading PDF content...\n");
            let mode = if structured { PdfMode::Structured } else { PdfMode::Full };
            render_pdf(&manager.summarize_pdf(&path, mode).await?)
        }
    };
    println!("{}", output);
    Ok(())
}

async fn prompt<R: AsyncBufRead + Unpin>(input: &mut R, question: &str) -> Result<String> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(question.as_bytes()).await?;
    stdout.flush().await?;

    let mut line = String::new();
    input.read_line(&mut line).await?;
    Ok(line.trim().to_string())
}

/// Ask for a source kind and the source itself, then summarize it.
///
/// Returns `Ok(None)` after printing the rejection message when the choice
/// is not recognized.
pub async fn read_command<R: AsyncBufRead + Unpin>(input: &mut R) -> Result<Option<SummarizeCommands>> {
    let answer = prompt(
        input,
        "Enter 'url' for article, 'homepage' for multiple articles, or 'pdf' to summarize from PDF: ",
    )
    .await?;

    let choice = match answer.parse::<Choice>() {
        Ok(choice) => choice,
        Err(message) => {
            println!("{}", message);
            return Ok(None);
        }
    };

    let command = match choice {
        Choice::Url => SummarizeCommands::Url {
            url: prompt(input, "Enter the article URL: ").await?,
        },
        Choice::Homepage => SummarizeCommands::Homepage {
            url: prompt(input, "Enter the news homepage URL (e.g. https://www.bbc.com/news): ").await?,
            max_articles: DEFAULT_MAX_ARTICLES,
        },
        Choice::Pdf => SummarizeCommands::Pdf {
            path: PathBuf::from(prompt(input, "Enter the full path to the PDF file: ").await?),
            structured: false,
        },
    };
    Ok(Some(command))
}

pub async fn run_interactive(manager: &SummaryManager) -> Result<()> {
    let mut stdin = tokio::io::BufReader::new(tokio::io::stdin());
    match read_command(&mut stdin).await? {
        Some(command) => handle_command(command, manager).await,
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ns_core::{Entity, EntityLabel, SectionSummary};

    #[test]
    fn test_choice_parse() {
        assert_eq!(" URL ".parse::<Choice>().unwrap(), Choice::Url);
        assert_eq!("homepage".parse::<Choice>().unwrap(), Choice::Homepage);
        assert_eq!("pdf".parse::<Choice>().unwrap(), Choice::Pdf);
        assert_eq!("rss".parse::<Choice>().unwrap_err(), INVALID_CHOICE);
    }

    #[tokio::test]
    async fn test_read_command_url() {
        let mut input: &[u8] = b"url\nhttps://news.example.com/a\n";
        let command = read_command(&mut input).await.unwrap();
        assert!(matches!(
            command,
            Some(SummarizeCommands::Url { ref url }) if url == "https://news.example.com/a"
        ));
    }

    #[tokio::test]
    async fn test_read_command_pdf_defaults_to_full() {
        let mut input: &[u8] = b"pdf\n/tmp/report.pdf\n";
        let command = read_command(&mut input).await.unwrap();
        assert!(matches!(
            command,
            Some(SummarizeCommands::Pdf { structured: false, ref path }) if path == &PathBuf::from("/tmp/report.pdf")
        ));
    }

    #[tokio::test]
    async fn test_read_command_rejects_invalid_choice() {
        let mut input: &[u8] = b"video\n";
        assert!(read_command(&mut input).await.unwrap().is_none());
    }

    #[test]
    fn test_render_homepage() {
        let groups = vec![ArticleSummary {
            url: "https://news.example.com/a".to_string(),
            title: "Bridge reopens".to_string(),
            summary: Summary::new(vec!["• The bridge reopened.".to_string()]),
        }];
        let out = render_homepage(&groups);
        assert!(out.contains("📰 Article 1: Bridge reopens\n• The bridge reopened.\n"));
        assert!(render_homepage(&[]).contains("No articles found"));
    }

    #[test]
    fn test_render_pdf_sections() {
        let mut summary = Summary::new(vec!["• Rates rose.".to_string()]);
        summary.missing_info.push(Entity::new("May 2024", EntityLabel::Date));
        let out = render_pdf(&PdfSummary::Sections {
            sections: vec![SectionSummary {
                headline: "MARKETS".to_string(),
                summary,
            }],
        });
        assert!(out.contains("🗞️ MARKETS"));
        assert!(out.contains("- DATE: May 2024"));
    }

    #[test]
    fn test_render_pdf_fallback_notice() {
        let out = render_pdf(&PdfSummary::Full {
            summary: Summary::new(vec!["• Done.".to_string()]),
            fell_back: true,
        });
        assert!(out.starts_with("⚠️ No headlines found"));
    }
}
