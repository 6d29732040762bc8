//! Standard-library type mappings for plain dataclasses.
//!
//! Only types importable from the Python standard library are used.
//! Formats without a standard equivalent fall back to `str`; the
//! version-pinned UUID classifications have no fallback and are declined.
//! Constraints are never rendered.

use tracing::{debug, trace};

use crate::config::FactoryConfig;
use crate::error::TypeResult;
use crate::factory::traits::{
    apply_wrappers, unsupported, BuildArgs, Classification, Scalar, TypeFactory, ANY,
};
use crate::imports::*;
use crate::ir::TypeNode;
use crate::version::PythonVersion;

/// Maps classifications to standard-library types.
#[derive(Debug, Clone, Default)]
pub struct DataclassTypeFactory {
    version: PythonVersion,
}

impl DataclassTypeFactory {
    /// Create a factory for the given dialect.
    pub fn new(version: PythonVersion) -> Self {
        Self { version }
    }

    /// Create a factory from configuration.
    pub fn from_config(config: &FactoryConfig) -> Self {
        Self::new(config.target_python_version)
    }

    fn scalar(classification: Classification) -> Option<Scalar> {
        let scalar = match classification {
            Classification::Integer | Classification::Int32 | Classification::Int64 => {
                Scalar::new("int", &[])
            }
            Classification::Number | Classification::Float | Classification::Double => {
                Scalar::new("float", &[])
            }
            Classification::Decimal => Scalar::new("Decimal", &[IMPORT_DECIMAL]),
            Classification::Time => Scalar::new("time", &[IMPORT_TIME]),
            Classification::Date => Scalar::new("date", &[IMPORT_DATE]),
            Classification::DateTime => Scalar::new("datetime", &[IMPORT_DATETIME]),
            Classification::String
            | Classification::Byte
            | Classification::Password
            | Classification::Email
            | Classification::Uri
            | Classification::Hostname => Scalar::new("str", &[]),
            Classification::Binary => Scalar::new("bytes", &[]),
            Classification::Uuid => Scalar::new("UUID", &[IMPORT_UUID]),
            Classification::Ipv4 => Scalar::new("IPv4Address", &[IMPORT_IPV4ADDRESS]),
            Classification::Ipv6 => Scalar::new("IPv6Address", &[IMPORT_IPV6ADDRESS]),
            Classification::Boolean => Scalar::new("bool", &[]),
            Classification::Null => Scalar::new("None", &[]),
            Classification::Any => ANY,
            Classification::Uuid1
            | Classification::Uuid2
            | Classification::Uuid3
            | Classification::Uuid4
            | Classification::Uuid5
            | Classification::Object
            | Classification::Array => return None,
        };
        Some(scalar)
    }
}

impl TypeFactory for DataclassTypeFactory {
    fn name(&self) -> &'static str {
        "DataclassTypeFactory"
    }

    fn version(&self) -> PythonVersion {
        self.version
    }

    fn build(&self, classification: Classification, args: &BuildArgs) -> TypeResult<TypeNode> {
        trace!(
            factory = self.name(),
            classification = %classification,
            version = %self.version,
            "Building type node"
        );

        let node = match classification {
            Classification::Object => TypeNode::dict_of(ANY.node(self.version)),
            Classification::Array => TypeNode::list_of(ANY.node(self.version)),
            other => match Self::scalar(other) {
                Some(scalar) => scalar.node(self.version),
                None => {
                    debug!(
                        factory = self.name(),
                        classification = %other,
                        "Classification has no standard library type"
                    );
                    return unsupported(self, other);
                }
            },
        };

        if args.has_constraints() {
            debug!(
                factory = self.name(),
                classification = %classification,
                "Ignoring constraints for dataclass field"
            );
        }
        Ok(apply_wrappers(node, args))
    }
}
