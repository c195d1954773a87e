//! Declarative macros shared by the models and request builders.

/// Declares a model whose state lives in an
/// [`InMemoryBackingStore`](msgraph_abstractions::InMemoryBackingStore).
///
/// Fields are written `kind "jsonName" => getter / setter: Type;` where
/// `kind` is one of:
///
/// * `value`: a serde-typed primitive, enum or list of primitives
/// * `object`: a nested [`Parsable`](msgraph_abstractions::Parsable) model
/// * `collection`: an array of nested models
///
/// An optional `= "#microsoft.graph.x"` after the name is the discriminator
/// written by `new()`.
macro_rules! graph_model {
    (@odata) => {
        None
    };
    (@odata $odata:literal) => {
        Some($odata)
    };

    (@accessors value $json:literal $getter:ident $setter:ident $ty:ty) => {
        pub fn $getter(&self) -> Option<$ty> {
            self.store.get_value($json)
        }

        pub fn $setter(&mut self, value: Option<$ty>) {
            self.store.set_value($json, value);
        }
    };
    (@accessors object $json:literal $getter:ident $setter:ident $ty:ty) => {
        pub fn $getter(&self) -> Option<$ty> {
            self.store.get_object($json)
        }

        pub fn $setter(&mut self, value: Option<&$ty>) {
            self.store.set_object($json, value);
        }
    };
    (@accessors collection $json:literal $getter:ident $setter:ident $ty:ty) => {
        pub fn $getter(&self) -> Option<Vec<$ty>> {
            self.store.get_collection($json)
        }

        pub fn $setter(&mut self, value: Option<&[$ty]>) {
            self.store.set_collection($json, value);
        }
    };

    (
        $(#[$meta:meta])*
        pub struct $name:ident $(= $odata:literal)? {
            $( $kind:ident $json:literal => $getter:ident / $setter:ident : $ty:ty; )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name {
            store: ::msgraph_abstractions::InMemoryBackingStore,
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl $name {
            pub fn new() -> Self {
                let mut store = ::msgraph_abstractions::InMemoryBackingStore::new();
                if let Some(odata_type) =
                    <Self as ::msgraph_abstractions::Parsable>::ODATA_TYPE
                {
                    store.set_value(
                        ::msgraph_abstractions::serialization::ODATA_TYPE_KEY,
                        Some(odata_type),
                    );
                }
                Self { store }
            }

            pub fn set_odata_type(&mut self, value: Option<String>) {
                self.store
                    .set_value(::msgraph_abstractions::serialization::ODATA_TYPE_KEY, value);
            }

            $( graph_model!(@accessors $kind $json $getter $setter $ty); )*
        }

        impl ::msgraph_abstractions::Parsable for $name {
            const ODATA_TYPE: Option<&'static str> = graph_model!(@odata $($odata)?);

            fn from_backing_store(store: ::msgraph_abstractions::InMemoryBackingStore) -> Self {
                Self { store }
            }

            fn backing_store(&self) -> &::msgraph_abstractions::InMemoryBackingStore {
                &self.store
            }

            fn backing_store_mut(&mut self) -> &mut ::msgraph_abstractions::InMemoryBackingStore {
                &mut self.store
            }

            fn field_names() -> &'static [&'static str] {
                &["@odata.type", $($json),*]
            }
        }
    };
}

/// Declares a paged collection response: `value`, `@odata.nextLink` and
/// `@odata.count` over items of one model type.
macro_rules! collection_response {
    ($(#[$meta:meta])* $name:ident => $item:ty) => {
        graph_model! {
            $(#[$meta])*
            pub struct $name {
                value "@odata.count" => odata_count / set_odata_count: i64;
                value "@odata.nextLink" => odata_next_link / set_odata_next_link: String;
                collection "value" => value / set_value: $item;
            }
        }

        impl $crate::models::CollectionResponse for $name {
            type Item = $item;

            fn items(&self) -> Vec<$item> {
                self.value().unwrap_or_default()
            }

            fn next_link(&self) -> Option<String> {
                self.odata_next_link().filter(|link| !link.is_empty())
            }
        }
    };
}

/// Declares a request builder addressing one URL template.
///
/// The builder keeps the template's path apart from its query expression so
/// that children extend the path and bring their own query expression.
macro_rules! request_builder {
    ($(#[$meta:meta])* $name:ident, $query:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name {
            base: ::msgraph_abstractions::BaseRequestBuilder,
            path: String,
        }

        #[allow(dead_code)]
        impl $name {
            /// `path` is the URL template up to, not including, its query
            /// expression.
            pub fn new(
                request_adapter: ::std::sync::Arc<dyn ::msgraph_abstractions::RequestAdapter>,
                path: String,
                path_parameters: &::std::collections::HashMap<String, String>,
            ) -> Self {
                let template = format!("{}{}", path, $query);
                Self {
                    base: ::msgraph_abstractions::BaseRequestBuilder::new(
                        request_adapter,
                        &template,
                        path_parameters,
                    ),
                    path,
                }
            }

            /// The same resource addressed by a fully built URL, for example
            /// an `@odata.nextLink`.
            pub fn with_url(&self, raw_url: &str) -> Self {
                Self {
                    base: ::msgraph_abstractions::BaseRequestBuilder::from_raw_url(
                        self.base.request_adapter.clone(),
                        &self.base.url_template,
                        raw_url,
                    ),
                    path: self.path.clone(),
                }
            }

            pub fn url_template(&self) -> &str {
                &self.base.url_template
            }

            pub fn path_parameters(&self) -> &::std::collections::HashMap<String, String> {
                &self.base.path_parameters
            }

            fn child<B>(
                &self,
                segment: &str,
                make: fn(
                    ::std::sync::Arc<dyn ::msgraph_abstractions::RequestAdapter>,
                    String,
                    &::std::collections::HashMap<String, String>,
                ) -> B,
            ) -> B {
                make(
                    self.base.request_adapter.clone(),
                    format!("{}{}", self.path, segment),
                    &self.base.child_parameters(),
                )
            }

            fn child_with<B>(
                &self,
                segment: &str,
                name: &str,
                value: String,
                make: fn(
                    ::std::sync::Arc<dyn ::msgraph_abstractions::RequestAdapter>,
                    String,
                    &::std::collections::HashMap<String, String>,
                ) -> B,
            ) -> B {
                make(
                    self.base.request_adapter.clone(),
                    format!("{}{}", self.path, segment),
                    &self.base.with_path_parameter(name, value),
                )
            }
        }
    };
}
