use crate::{ManifestEntry, ManifestError, Stage, UniformBinding, VectorParam};
use log::{debug, warn};
use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub(crate) struct RawManifest {
    shaders: Vec<RawEntry>,
}

#[derive(Deserialize, Debug)]
struct RawEntry {
    stage: String,
    filename: String,
    #[serde(default)]
    uniforms: Vec<RawUniform>,
}

#[derive(Deserialize, Debug)]
struct RawUniform {
    uniform_name: Option<String>,
    shader_params: Option<Vec<RawVectorParam>>,
    image: Option<String>,
}

#[derive(Deserialize, Debug)]
struct RawVectorParam {
    name: Option<String>,
    floats: Option<u8>,
}

impl RawManifest {
    pub(crate) fn into_entries(self) -> Result<Vec<ManifestEntry>, ManifestError> {
        let mut entries = Vec::with_capacity(self.shaders.len());

        for entry in self.shaders {
            let stage = match Stage::from_manifest_name(&entry.stage) {
                Some(stage) => stage,
                None => {
                    return Err(ManifestError::MalformedEntry {
                        stage: entry.stage,
                        filename: entry.filename,
                    });
                }
            };
            let uniforms = entry
                .uniforms
                .into_iter()
                .filter_map(|uniform| uniform.into_binding(&entry.filename))
                .collect();

            entries.push(ManifestEntry::new(stage, entry.filename).with_uniforms(uniforms));
        }

        Ok(entries)
    }
}

impl RawUniform {
    fn into_binding(self, filename: &str) -> Option<UniformBinding> {
        let name = match self.uniform_name {
            Some(name) => name,
            None => {
                debug!("a uniform of `{}` has no name. skipping.", filename);
                return None;
            }
        };

        match (self.shader_params, self.image) {
            (Some(params), image) => {
                if image.is_some() {
                    warn!(
                        "the uniform `{}` of `{}` has both shader params and an image; the image is ignored.",
                        name, filename
                    );
                }

                let params = params
                    .into_iter()
                    .filter_map(|param| match (param.name, param.floats) {
                        (Some(name), Some(floats)) => Some(VectorParam::new(name, floats)),
                        _ => {
                            warn!(
                                "a shader param of the uniform `{}` of `{}` is missing `name` or `floats`. skipping.",
                                name, filename
                            );
                            None
                        }
                    })
                    .collect();

                Some(UniformBinding::vectors(name, params))
            }
            (None, Some(image)) => Some(UniformBinding::image(name, image)),
            (None, None) => {
                debug!(
                    "the uniform `{}` of `{}` has neither shader params nor an image. skipping.",
                    name, filename
                );
                None
            }
        }
    }
}
