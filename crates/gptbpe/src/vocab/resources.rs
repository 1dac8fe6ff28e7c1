//! # Remote Resources

use std::path::PathBuf;

use crate::errors::BpeResult;

/// A resource with constant mirror URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConstUrlResource {
    /// Mirror URLs for the resource; all serve the same file.
    pub urls: &'static [&'static str],
}

/// A cache-keyed resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConstKeyedResource {
    /// Cache path prefix for this resource.
    ///
    /// This is used in place of the URL for local caching.
    pub key: &'static [&'static str],

    /// The resource associated with this key.
    pub resource: ConstUrlResource,
}

/// GPT-2 `DataGym` "encoder.json".
pub const GPT2_ENCODER_JSON_RESOURCE: ConstKeyedResource = ConstKeyedResource {
    key: &["openai", "gpt2"],
    resource: ConstUrlResource {
        urls: &["https://openaipublic.blob.core.windows.net/gpt-2/encodings/main/encoder.json"],
    },
};

/// GPT-2 `DataGym` "vocab.bpe".
pub const GPT2_VOCAB_BPE_RESOURCE: ConstKeyedResource = ConstKeyedResource {
    key: &["openai", "gpt2"],
    resource: ConstUrlResource {
        urls: &["https://openaipublic.blob.core.windows.net/gpt-2/encodings/main/vocab.bpe"],
    },
};

/// A trait for resolving resources to local files.
pub trait ResourceLoader {
    /// Resolve a resource to a local path, fetching it if needed.
    fn load_resource_path(
        &mut self,
        resource: &ConstKeyedResource,
    ) -> BpeResult<PathBuf>;
}

#[cfg(feature = "download")]
impl ResourceLoader for gptbpe_disk_cache::GptbpeDiskCache {
    fn load_resource_path(
        &mut self,
        resource: &ConstKeyedResource,
    ) -> BpeResult<PathBuf> {
        self.load_cached_path(resource.key, resource.resource.urls, true)
            .map_err(|e| crate::errors::BpeError::External(format!("{e:#}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gpt2_resources() {
        for resource in [GPT2_ENCODER_JSON_RESOURCE, GPT2_VOCAB_BPE_RESOURCE] {
            assert_eq!(resource.key, &["openai", "gpt2"]);
            assert_eq!(resource.resource.urls.len(), 1);
            assert!(resource.resource.urls[0].starts_with("https://"));
        }
        assert!(GPT2_VOCAB_BPE_RESOURCE.resource.urls[0].ends_with("/vocab.bpe"));
        assert!(GPT2_ENCODER_JSON_RESOURCE.resource.urls[0].ends_with("/encoder.json"));
    }
}
