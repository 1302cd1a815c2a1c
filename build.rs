use shadow_rs::ShadowBuilder;

fn main() {
    // Build metadata for the `--version` output of the CLI
    ShadowBuilder::builder()
        .build()
        .expect("Failed to generate build metadata");
}
