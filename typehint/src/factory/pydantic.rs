//! Pydantic type mappings.
//!
//! This module maps classifications to the types pydantic models use.
//!
//! # Type Mappings
//!
//! | Classification | Type hint |
//! |----------------|-----------|
//! | `integer`, `int32`, `int64` | `int` |
//! | `number`, `float`, `double` | `float` |
//! | `decimal` | `Decimal` |
//! | `string`, `byte` | `str` |
//! | `binary` | `bytes` |
//! | `date`, `date_time`, `time` | `date`, `datetime`, `time` |
//! | `password` | `SecretStr` |
//! | `email` | `EmailStr` |
//! | `uuid`, `uuid1`..`uuid5` | `UUID`, `UUID1`..`UUID5` |
//! | `uri` | `AnyUrl` |
//! | `hostname` | `constr(regex=r'...')` |
//! | `ipv4`, `ipv6` | `IPv4Address`, `IPv6Address` |
//! | `boolean` | `bool` |
//! | `object` | `Dict[str, Any]` |
//! | `null` | `None` |
//! | `array` | `List[Any]` |
//! | `any` | `Any` |
//!
//! Integer, float, decimal and string classifications with constraints
//! become `conint(...)`, `confloat(...)`, `condecimal(...)` and
//! `constr(...)` calls.

use tracing::{debug, trace};

use crate::config::FactoryConfig;
use crate::error::TypeResult;
use crate::factory::traits::{
    apply_wrappers, call_node, pattern_literal, BuildArgs, Classification, Scalar, TypeFactory,
    ANY,
};
use crate::imports::*;
use crate::ir::TypeNode;
use crate::version::PythonVersion;

/// Hostname pattern used for the `hostname` format.
pub const HOSTNAME_REGEX: &str = r"^(([a-zA-Z0-9]|[a-zA-Z0-9][a-zA-Z0-9\-]*[a-zA-Z0-9])\.)*([A-Za-z0-9]|[A-Za-z0-9][A-Za-z0-9\-]*[A-Za-z0-9])$";

/// Maps classifications to pydantic field types.
#[derive(Debug, Clone)]
pub struct PydanticTypeFactory {
    version: PythonVersion,
    use_constrained_types: bool,
}

impl Default for PydanticTypeFactory {
    fn default() -> Self {
        Self::new(PythonVersion::default())
    }
}

impl PydanticTypeFactory {
    /// Create a factory for the given dialect.
    pub fn new(version: PythonVersion) -> Self {
        Self {
            version,
            use_constrained_types: true,
        }
    }

    /// Create a factory from configuration.
    pub fn from_config(config: &FactoryConfig) -> Self {
        Self {
            version: config.target_python_version,
            use_constrained_types: config.use_constrained_types,
        }
    }

    /// Enable or disable `con*` types for constrained fields.
    pub fn with_constrained_types(mut self, enabled: bool) -> Self {
        self.use_constrained_types = enabled;
        self
    }

    /// Node for a classification without constraints.
    fn plain(&self, classification: Classification) -> TypeNode {
        let scalar = match classification {
            Classification::Integer | Classification::Int32 | Classification::Int64 => {
                Scalar::new("int", &[])
            }
            Classification::Number | Classification::Float | Classification::Double => {
                Scalar::new("float", &[])
            }
            Classification::Decimal => Scalar::new("Decimal", &[IMPORT_DECIMAL]),
            Classification::Time => Scalar::new("time", &[IMPORT_TIME]),
            Classification::String | Classification::Byte => Scalar::new("str", &[]),
            Classification::Binary => Scalar::new("bytes", &[]),
            Classification::Date => Scalar::new("date", &[IMPORT_DATE]),
            Classification::DateTime => Scalar::new("datetime", &[IMPORT_DATETIME]),
            Classification::Password => Scalar::new("SecretStr", &[IMPORT_SECRET_STR]),
            Classification::Email => Scalar::new("EmailStr", &[IMPORT_EMAIL_STR]),
            Classification::Uuid => Scalar::new("UUID", &[IMPORT_UUID]),
            Classification::Uuid1 => Scalar::new("UUID1", &[IMPORT_UUID1]),
            Classification::Uuid2 => Scalar::new("UUID2", &[IMPORT_UUID2]),
            Classification::Uuid3 => Scalar::new("UUID3", &[IMPORT_UUID3]),
            Classification::Uuid4 => Scalar::new("UUID4", &[IMPORT_UUID4]),
            Classification::Uuid5 => Scalar::new("UUID5", &[IMPORT_UUID5]),
            Classification::Uri => Scalar::new("AnyUrl", &[IMPORT_ANYURL]),
            Classification::Ipv4 => Scalar::new("IPv4Address", &[IMPORT_IPV4ADDRESS]),
            Classification::Ipv6 => Scalar::new("IPv6Address", &[IMPORT_IPV6ADDRESS]),
            Classification::Boolean => Scalar::new("bool", &[]),
            Classification::Null => Scalar::new("None", &[]),
            Classification::Any => ANY,
            Classification::Hostname => {
                return call_node(
                    "constr",
                    IMPORT_CONSTR,
                    vec![("regex", pattern_literal(HOSTNAME_REGEX))],
                    self.version,
                )
            }
            Classification::Object => return TypeNode::dict_of(ANY.node(self.version)),
            Classification::Array => return TypeNode::list_of(ANY.node(self.version)),
        };
        scalar.node(self.version)
    }

    /// Build a `con*` call when the arguments constrain this
    /// classification.
    fn constrained(&self, classification: Classification, args: &BuildArgs) -> Option<TypeNode> {
        if !self.use_constrained_types {
            return None;
        }
        let (callee, import, kwargs) = if classification.is_integer() {
            ("conint", IMPORT_CONINT, args.numeric_kwargs())
        } else if classification.is_float() {
            ("confloat", IMPORT_CONFLOAT, args.numeric_kwargs())
        } else if classification == Classification::Decimal {
            ("condecimal", IMPORT_CONDECIMAL, args.numeric_kwargs())
        } else if classification == Classification::String {
            ("constr", IMPORT_CONSTR, args.string_kwargs())
        } else {
            return None;
        };
        if kwargs.is_empty() {
            return None;
        }
        Some(call_node(callee, import, kwargs, self.version))
    }

    fn build_inner(&self, classification: Classification, args: &BuildArgs) -> TypeNode {
        if let Some(node) = self.constrained(classification, args) {
            return node;
        }
        if args.has_constraints() {
            debug!(
                factory = self.name(),
                classification = %classification,
                "Ignoring constraints without a constrained type"
            );
        }
        self.plain(classification)
    }
}

impl TypeFactory for PydanticTypeFactory {
    fn name(&self) -> &'static str {
        "PydanticTypeFactory"
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
        Ok(apply_wrappers(self.build_inner(classification, args), args))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::Reference;

    fn factory() -> PydanticTypeFactory {
        PydanticTypeFactory::new(PythonVersion::Py37)
    }

    fn hint(classification: Classification) -> String {
        factory()
            .build(classification, &BuildArgs::new())
            .unwrap()
            .type_hint()
    }

    // =========================================================================
    // Scalars
    // =========================================================================

    #[test]
    fn test_numeric_scalars() {
        assert_eq!(hint(Classification::Integer), "int");
        assert_eq!(hint(Classification::Int32), "int");
        assert_eq!(hint(Classification::Int64), "int");
        assert_eq!(hint(Classification::Number), "float");
        assert_eq!(hint(Classification::Float), "float");
        assert_eq!(hint(Classification::Double), "float");
        assert_eq!(hint(Classification::Decimal), "Decimal");
    }

    #[test]
    fn test_string_formats() {
        assert_eq!(hint(Classification::String), "str");
        assert_eq!(hint(Classification::Byte), "str");
        assert_eq!(hint(Classification::Binary), "bytes");
        assert_eq!(hint(Classification::Password), "SecretStr");
        assert_eq!(hint(Classification::Email), "EmailStr");
        assert_eq!(hint(Classification::Uri), "AnyUrl");
        assert_eq!(hint(Classification::Ipv4), "IPv4Address");
        assert_eq!(hint(Classification::Ipv6), "IPv6Address");
    }

    #[test]
    fn test_temporal_and_uuid() {
        assert_eq!(hint(Classification::Date), "date");
        assert_eq!(hint(Classification::DateTime), "datetime");
        assert_eq!(hint(Classification::Time), "time");
        assert_eq!(hint(Classification::Uuid), "UUID");
        assert_eq!(hint(Classification::Uuid4), "UUID4");
    }

    #[test]
    fn test_scalar_imports() {
        let node = factory()
            .build(Classification::DateTime, &BuildArgs::new())
            .unwrap();
        assert_eq!(
            node.imports().iter().copied().collect::<Vec<_>>(),
            vec![IMPORT_DATETIME]
        );

        let node = factory().build(Classification::Integer, &BuildArgs::new()).unwrap();
        assert!(node.imports().is_empty());
    }

    #[test]
    fn test_hostname_is_constr_call() {
        let node = factory()
            .build(Classification::Hostname, &BuildArgs::new())
            .unwrap();
        assert!(node.is_func());
        assert_eq!(node.type_hint(), format!("constr(regex=r'{}')", HOSTNAME_REGEX));
        assert!(node.imports().contains(&IMPORT_CONSTR));
    }

    // =========================================================================
    // Structural
    // =========================================================================

    #[test]
    fn test_object_and_array() {
        let object = factory().build(Classification::Object, &BuildArgs::new()).unwrap();
        assert_eq!(object.type_hint(), "Dict[str, Any]");
        assert_eq!(
            object.imports().iter().copied().collect::<Vec<_>>(),
            vec![IMPORT_DICT, IMPORT_ANY]
        );

        let array = factory().build(Classification::Array, &BuildArgs::new()).unwrap();
        assert_eq!(array.type_hint(), "List[Any]");
    }

    #[test]
    fn test_null_and_any() {
        assert_eq!(hint(Classification::Null), "None");
        assert_eq!(hint(Classification::Any), "Any");
    }

    #[test]
    fn test_only_any_maps_to_any() {
        for classification in Classification::ALL {
            if classification != Classification::Any {
                assert_ne!(hint(classification), "Any", "{} fell back to Any", classification);
            }
        }
    }

    #[test]
    fn test_every_classification_supported() {
        for classification in Classification::ALL {
            assert!(factory().build(classification, &BuildArgs::new()).is_ok());
        }
    }

    // =========================================================================
    // Wrappers and constraints
    // =========================================================================

    #[test]
    fn test_optional_list_wrappers() {
        let args = BuildArgs::new().with_list(true).with_optional(true);
        let node = factory().build(Classification::Object, &args).unwrap();
        assert_eq!(node.type_hint(), "Optional[List[Dict[str, Any]]]");
    }

    #[test]
    fn test_conint() {
        let args = BuildArgs::new().with_ge("0").with_lt("100");
        let node = factory().build(Classification::Int64, &args).unwrap();
        assert_eq!(node.type_hint(), "conint(ge=0, lt=100)");
        assert!(node.imports().contains(&IMPORT_CONINT));
    }

    #[test]
    fn test_confloat_and_condecimal() {
        let args = BuildArgs::new().with_multiple_of("0.5");
        let node = factory().build(Classification::Double, &args).unwrap();
        assert_eq!(node.type_hint(), "confloat(multiple_of=0.5)");

        let node = factory().build(Classification::Decimal, &args).unwrap();
        assert_eq!(node.type_hint(), "condecimal(multiple_of=0.5)");
    }

    #[test]
    fn test_constr() {
        let args = BuildArgs::new().with_max_length(64).with_regex("^[a-z]+$");
        let node = factory()
            .build(Classification::String, &args.with_optional(true))
            .unwrap();
        assert_eq!(
            node.type_hint(),
            "Optional[constr(max_length=64, regex=r'^[a-z]+$')]"
        );
    }

    #[test]
    fn test_mismatched_constraints_ignored() {
        let args = BuildArgs::new().with_min_length(3);
        assert_eq!(
            factory().build(Classification::Integer, &args).unwrap().type_hint(),
            "int"
        );
    }

    #[test]
    fn test_constrained_types_disabled() {
        let factory = factory().with_constrained_types(false);
        let args = BuildArgs::new().with_ge("0");
        assert_eq!(
            factory.build(Classification::Integer, &args).unwrap().type_hint(),
            "int"
        );
    }

    // =========================================================================
    // Dialect
    // =========================================================================

    #[test]
    fn test_version_baked_into_nodes() {
        let factory = PydanticTypeFactory::new(PythonVersion::Py36);
        let node = factory
            .build(Classification::Array, &BuildArgs::new().with_optional(true))
            .unwrap();
        assert!(node.all_nodes().all(|n| n.version() == PythonVersion::Py36));
    }

    #[test]
    fn test_reference_leaves() {
        let factory = PydanticTypeFactory::new(PythonVersion::Py36);
        let pet = Reference::new("#/definitions/Pet", "Pet");
        let node = factory.reference(&pet, true);
        assert_eq!(node.type_hint(), "List['Pet']");

        let node = factory.model_name("Owner", false);
        assert_eq!(node.type_hint(), "'Owner'");

        let union = factory.union(vec![
            factory.build(Classification::Integer, &BuildArgs::new()).unwrap(),
            factory.model_name("Owner", false),
        ]);
        assert_eq!(union.type_hint(), "Union[int, 'Owner']");
    }
}
