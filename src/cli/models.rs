//! Models command implementation

use crate::cli::output::{format_models_json, format_models_table, ModelView};
use crate::cli::run::load_config_file;
use crate::cli::ModelsArgs;
use crate::gateway::{Gateway, HttpGateway};

/// Merge the advertised list with the configured one.
///
/// Advertised models come first in gateway order; configured models the gateway
/// does not list are appended.
pub fn merge_models(advertised: &[String], configured: &[String]) -> Vec<ModelView> {
    let mut views: Vec<ModelView> = advertised
        .iter()
        .map(|id| ModelView {
            id: id.clone(),
            advertised: true,
            configured: configured.contains(id),
        })
        .collect();

    for id in configured {
        if !advertised.contains(id) {
            views.push(ModelView {
                id: id.clone(),
                advertised: false,
                configured: true,
            });
        }
    }

    views
}

/// Handle models command
pub async fn handle_models(args: &ModelsArgs) -> Result<String, Box<dyn std::error::Error>> {
    let mut config = load_config_file(args.config.as_deref())?.with_env_overrides();
    if let Some(ref base_url) = args.base_url {
        config.gateway.base_url = base_url.clone();
    }

    let gateway = HttpGateway::from_config(&config.gateway)?;
    let advertised = gateway.list_models().await?;
    let models = merge_models(&advertised, &config.suite.models);

    if args.json {
        Ok(format_models_json(&models)?)
    } else {
        Ok(format_models_table(&models))
    }
}
