//! doctrine-entity-gen - generate Doctrine entity classes from TOML manifests
//!
//! Usage: `doctrine-entity-gen <manifest.toml>...`
//!
//! Each manifest is loaded, every entity in it is generated with the
//! manifest's options, and the written paths are logged.

use doctrine_entity_gen::logging::init_tracing;
use doctrine_entity_gen::provider::ManifestProvider;
use doctrine_entity_gen::EntityGenerator;
use std::env;

fn main() {
    init_tracing("info");

    if let Err(e) = run() {
        eprintln!("doctrine-entity-gen: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let manifests: Vec<String> = env::args().skip(1).collect();
    if manifests.is_empty() {
        return Err("usage: doctrine-entity-gen <manifest.toml>...".into());
    }

    for manifest in &manifests {
        let provider = ManifestProvider::load(manifest)?;
        let generator = EntityGenerator::new(provider.options().clone());
        let written = generator.generate_all(&provider)?;
        tracing::info!(manifest = %manifest, files = written.len(), "manifest done");
    }

    Ok(())
}
