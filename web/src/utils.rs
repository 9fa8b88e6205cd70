use gloo::storage::errors::StorageError as WebStorageError;
use gloo::storage::{LocalStorage, Storage};
use memorito_core::{BlobStore, LeaderboardStore, StorageError, StorageResult};
use serde::Serialize;
use serde::de::DeserializeOwned;
use yew::prelude::*;

/// Where a value lives in `localStorage`.
pub(crate) trait StorageKey {
    const KEY: &'static str;
}

pub(crate) trait LocalOrDefault: Sized {
    fn local_or_default() -> Self;
    fn local_save(&self);
}

impl<T> LocalOrDefault for T
where
    T: StorageKey + Default + Serialize + DeserializeOwned,
{
    fn local_or_default() -> Self {
        match LocalStorage::get(T::KEY) {
            Ok(value) => value,
            Err(WebStorageError::KeyNotFound(_)) => Default::default(),
            Err(err) => {
                log::warn!("Could not load {} from local storage: {}", T::KEY, err);
                Default::default()
            }
        }
    }

    fn local_save(&self) {
        if let Err(err) = LocalStorage::set(T::KEY, self) {
            log::error!("Could not save {} to local storage: {:?}", T::KEY, err);
        }
    }
}

/// [`BlobStore`] backed by the browser's `localStorage`.
#[derive(Copy, Clone, Debug, Default)]
pub(crate) struct LocalBlobStore;

impl BlobStore for LocalBlobStore {
    fn load<T: DeserializeOwned>(&self, key: &str) -> StorageResult<Option<T>> {
        match LocalStorage::get(key) {
            Ok(value) => Ok(Some(value)),
            Err(WebStorageError::KeyNotFound(_)) => Ok(None),
            Err(WebStorageError::SerdeError(err)) => Err(StorageError::Malformed(err.to_string())),
            Err(err) => Err(StorageError::Backend(err.to_string())),
        }
    }

    fn save<T: Serialize>(&mut self, key: &str, value: &T) -> StorageResult<()> {
        LocalStorage::set(key, value).map_err(|err| StorageError::Backend(err.to_string()))
    }

    fn delete(&mut self, key: &str) {
        LocalStorage::delete(key);
    }
}

pub(crate) fn high_scores() -> LeaderboardStore<LocalBlobStore> {
    LeaderboardStore::new(LocalBlobStore)
}

#[derive(Properties, PartialEq)]
pub(crate) struct ModalProps {
    #[prop_or_default]
    pub children: Html,
}

/// Helper component to attatch the contents into the document.body instead of in the place where it's used.
#[function_component]
pub(crate) fn Modal(props: &ModalProps) -> Html {
    let modal_host = gloo::utils::body();
    create_portal(props.children.clone(), modal_host.into())
}

/// Helper function to use JavaScript's Math.random
pub(crate) fn js_random_seed() -> u64 {
    use js_sys::Math::random;
    u64::from_be_bytes([
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
    ])
}

pub(crate) fn format_for_counter(num: u32) -> String {
    match num {
        0..1000 => format!("{:03}", num),
        1000.. => "999".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_is_three_digits() {
        assert_eq!(format_for_counter(0), "000");
        assert_eq!(format_for_counter(42), "042");
        assert_eq!(format_for_counter(999), "999");
        assert_eq!(format_for_counter(4000), "999");
    }
}
