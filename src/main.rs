use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use version_tagger::cli::run_tag_workflow;
use version_tagger::config::{self, ConfigOverrides};
use version_tagger::context::{ActionContext, RepoSlug};
use version_tagger::hosting::GitHubApi;
use version_tagger::outputs::RunOutputs;
use version_tagger::{ui, TaggerError};

#[derive(clap::Parser)]
#[command(
    name = "version-tagger",
    version,
    about = "Tag and release the version declared in a source file"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(
        long,
        env = "INPUT_API_TOKEN",
        hide_env_values = true,
        help = "Token for the hosting API"
    )]
    api_token: Option<String>,

    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true, hide = true)]
    github_token: Option<String>,

    #[arg(long, env = "INPUT_SOURCE_FILE", help = "File containing the version")]
    source_file: Option<PathBuf>,

    #[arg(
        long,
        env = "INPUT_VERSION_PATTERN",
        help = "Regex with a named group `version`"
    )]
    version_pattern: Option<String>,

    #[arg(
        long,
        env = "INPUT_TAG_FORMAT",
        help = "Tag name template with {version} and optional {revision}"
    )]
    tag_format: Option<String>,

    #[arg(
        long,
        env = "INPUT_PREFIX_TAG_MESSAGE",
        help = "Start the tag message with the tag name"
    )]
    prefix_tag_message: Option<bool>,

    #[arg(long, env = "GITHUB_REPOSITORY", help = "Repository as owner/name")]
    repository: Option<String>,

    #[arg(long, env = "GITHUB_SHA", help = "Commit to tag")]
    commit_sha: Option<String>,

    #[arg(long, env = "GITHUB_API_URL", help = "Hosting API root URL")]
    api_url: Option<String>,

    #[arg(long, env = "GITHUB_OUTPUT", help = "File receiving run outputs")]
    output_file: Option<PathBuf>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        ui::display_error(&e.to_string());
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let mut config = config::load_config(args.config.as_deref())?;
    config.apply_overrides(ConfigOverrides {
        source_file: args.source_file,
        version_pattern: args.version_pattern,
        tag_format: args.tag_format,
        prefix_tag_message: args.prefix_tag_message,
        api_url: args.api_url,
    });

    let inputs = config.to_inputs(args.api_token.or(args.github_token))?;

    let repository: RepoSlug = args
        .repository
        .ok_or_else(|| TaggerError::config("repository is required (GITHUB_REPOSITORY)"))?
        .parse()?;

    let context = ActionContext::new(
        repository,
        args.commit_sha,
        config.api.url.clone(),
        args.output_file,
    );

    let hosting = GitHubApi::new(
        &context.api_url,
        context.repository.clone(),
        &inputs.api_token,
    )?;

    ui::display_status(&format!(
        "Tagging {} from {}",
        context.repository,
        inputs.source_file.display()
    ));

    // Whatever the run produced is reported, even when a later step failed
    let mut outputs = RunOutputs::default();
    let result = run_tag_workflow(&inputs, &context, &hosting, &mut outputs);
    let written = if outputs.is_empty() {
        Ok(())
    } else {
        outputs.write(context.output_file.as_deref())
    };
    let result = result?;
    written?;

    match &result.skipped {
        Some(reason) => ui::display_skip(reason),
        None => {
            if let Some(tag) = &outputs.tag_name {
                ui::display_proposed_tag(result.previous_tag.as_deref(), tag);
            }
            ui::display_published(&outputs);
        }
    }

    Ok(())
}
