use std::any::Any;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::error::{Result, ValueError};
use crate::value::{Map, Value};

/// An instance of a named product type together with the field map it was
/// built from.
///
/// The typed instance is shared and type-erased; the field map keeps the record
/// readable field by field, so a record can be fed back into an object schema.
#[derive(Clone)]
pub struct Record {
    type_name: &'static str,
    fields: Map,
    instance: Arc<dyn Any + Send + Sync>,
}

impl Record {
    /// Wrap an existing instance, reading its fields through `Serialize`.
    pub fn new<T>(instance: T) -> Result<Self>
    where
        T: Serialize + Any + Send + Sync,
    {
        let type_name = std::any::type_name::<T>();
        match Value::from(serde_json::to_value(&instance)?) {
            Value::Object(fields) => Ok(Self::from_parts(fields, instance)),
            _ => Err(ValueError::NotAnObject { type_name }),
        }
    }

    /// Pair an instance with the field map it was built from.
    pub fn from_parts<T>(fields: Map, instance: T) -> Self
    where
        T: Any + Send + Sync,
    {
        Self {
            type_name: std::any::type_name::<T>(),
            fields,
            instance: Arc::new(instance),
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn fields(&self) -> &Map {
        &self.fields
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn is<T: 'static>(&self) -> bool {
        self.instance.is::<T>()
    }

    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.instance.downcast_ref::<T>()
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.type_name == other.type_name && self.fields == other.fields
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Record")
            .field("type_name", &self.type_name)
            .field("fields", &self.fields)
            .finish()
    }
}
