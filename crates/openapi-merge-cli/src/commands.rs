use anyhow::Context;
use openapi_merge_core::{merge_files, MergeSummary};
use tracing::info;

use crate::cli::MergeArgs;

pub fn run_merge(args: MergeArgs) -> anyhow::Result<MergeSummary> {
    info!(
        output = %args.output.display(),
        inputs = args.inputs.len(),
        server = ?args.options.server_url(),
        "merging OpenAPI documents"
    );
    merge_files(&args.output, &args.inputs, args.options)
        .with_context(|| format!("could not produce {}", args.output.display()))
}
