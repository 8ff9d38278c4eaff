//! # CRD Generator
//!
//! Generates the CustomResourceDefinition YAML for every kind the operator manages.
//!
//! ## Usage
//!
//! ```bash
//! # Generate CRD YAML
//! cargo run --bin crdgen > config/crd/nexus-operator.yaml
//!
//! # Generate and apply directly
//! cargo run --bin crdgen | kubectl apply -f -
//! ```
//!
//! The output is a multi-document stream: Repository, Privilege, Role, ContentSelector.

use kube::core::CustomResourceExt;
use nexus_operator::crd::{ContentSelector, Privilege, Repository, Role};

fn main() {
    let crds = [
        Repository::crd(),
        Privilege::crd(),
        Role::crd(),
        ContentSelector::crd(),
    ];

    for crd in &crds {
        match serde_yaml::to_string(crd) {
            Ok(yaml) => {
                print!("---\n{yaml}");
            }
            Err(e) => {
                eprintln!("Failed to serialize CRD to YAML: {e}");
                std::process::exit(1);
            }
        }
    }
}
