//! Declarative parameter contracts for MCP tools.
//!
//! Every tool declares its accepted arguments as a [`ToolSchema`]: an ordered
//! set of named [`ParamSpec`]s, each carrying the semantic type, optionality,
//! default value, and value constraints of one parameter. A single shared
//! [`ToolSchema::validate`] pass checks raw caller arguments against the
//! contract and produces the normalized argument map handed to the tool
//! handler. Nothing reaches the network before this pass succeeds.
//!
//! Validation returns a tagged [`Violation`] rather than panicking or
//! throwing, so argument failures stay cleanly separable from network
//! failures. The same contract renders to a JSON Schema object via
//! [`ToolSchema::to_json_schema`] for tool discovery.

use serde_json::{Map, Value, json};

/// Semantic type of a single parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// Whole number (JSON number with no fractional part).
    Integer,
    /// Any JSON number.
    Number,
    /// UTF-8 string.
    String,
    /// Boolean.
    Boolean,
    /// JSON array.
    Array,
    /// JSON object.
    Object,
}

impl ParamKind {
    fn json_type(self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Number => "number",
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Array => "array",
            Self::Object => "object",
        }
    }

    fn matches(self, value: &Value) -> bool {
        match self {
            Self::Integer => value.as_i64().is_some() || value.as_u64().is_some(),
            Self::Number => value.is_number(),
            Self::String => value.is_string(),
            Self::Boolean => value.is_boolean(),
            Self::Array => value.is_array(),
            Self::Object => value.is_object(),
        }
    }
}

/// Element contract for array parameters.
#[derive(Debug, Clone)]
enum ArrayItems {
    /// Every element must match the given scalar kind.
    Kind(ParamKind),
    /// Every element is an object validated against its own contract.
    Schema(ToolSchema),
}

/// Contract for one named parameter.
///
/// Built with the kind constructors ([`ParamSpec::integer`],
/// [`ParamSpec::string`], ...) and refined with the constraint builders.
/// Parameters are required unless marked [`optional`](Self::optional) or
/// given a [`default`](Self::default_value).
#[derive(Debug, Clone)]
pub struct ParamSpec {
    kind: ParamKind,
    description: &'static str,
    required: bool,
    default: Option<Value>,
    minimum: Option<f64>,
    maximum: Option<f64>,
    min_length: Option<usize>,
    min_items: Option<usize>,
    choices: &'static [&'static str],
    items: Option<Box<ArrayItems>>,
    value_kind: Option<ParamKind>,
}

impl ParamSpec {
    fn new(kind: ParamKind, description: &'static str) -> Self {
        Self {
            kind,
            description,
            required: true,
            default: None,
            minimum: None,
            maximum: None,
            min_length: None,
            min_items: None,
            choices: &[],
            items: None,
            value_kind: None,
        }
    }

    /// Whole-number parameter.
    pub fn integer(description: &'static str) -> Self {
        Self::new(ParamKind::Integer, description)
    }

    /// Numeric parameter.
    pub fn number(description: &'static str) -> Self {
        Self::new(ParamKind::Number, description)
    }

    /// String parameter.
    pub fn string(description: &'static str) -> Self {
        Self::new(ParamKind::String, description)
    }

    /// Boolean parameter.
    pub fn boolean(description: &'static str) -> Self {
        Self::new(ParamKind::Boolean, description)
    }

    /// Array whose elements must match a scalar kind.
    pub fn array_of(kind: ParamKind, description: &'static str) -> Self {
        let mut spec = Self::new(ParamKind::Array, description);
        spec.items = Some(Box::new(ArrayItems::Kind(kind)));
        spec
    }

    /// Array whose elements are objects validated against `items`.
    ///
    /// Element validation applies the item contract in full, including
    /// defaults, so nested optional-with-default fields are normalized the
    /// same way top-level ones are.
    pub fn array_of_objects(items: ToolSchema, description: &'static str) -> Self {
        let mut spec = Self::new(ParamKind::Array, description);
        spec.items = Some(Box::new(ArrayItems::Schema(items)));
        spec
    }

    /// Map-shaped object whose values must all match `value_kind`.
    pub fn map_of(value_kind: ParamKind, description: &'static str) -> Self {
        let mut spec = Self::new(ParamKind::Object, description);
        spec.value_kind = Some(value_kind);
        spec
    }

    /// Marks the parameter optional with no default.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Marks the parameter optional with a default substituted when absent.
    pub fn default_value(mut self, default: Value) -> Self {
        self.required = false;
        self.default = Some(default);
        self
    }

    /// Inclusive lower bound for numeric parameters.
    pub fn min(mut self, minimum: f64) -> Self {
        self.minimum = Some(minimum);
        self
    }

    /// Inclusive upper bound for numeric parameters.
    pub fn max(mut self, maximum: f64) -> Self {
        self.maximum = Some(maximum);
        self
    }

    /// Minimum length in characters for string parameters.
    pub fn min_len(mut self, length: usize) -> Self {
        self.min_length = Some(length);
        self
    }

    /// Minimum number of elements for array parameters.
    pub fn min_items(mut self, count: usize) -> Self {
        self.min_items = Some(count);
        self
    }

    /// Restricts a string parameter to an enumerated value set.
    pub fn one_of(mut self, choices: &'static [&'static str]) -> Self {
        self.choices = choices;
        self
    }

    /// JSON Schema rendering of this parameter.
    fn json_schema(&self) -> Value {
        let mut out = Map::new();
        out.insert("type".to_owned(), Value::from(self.kind.json_type()));
        if !self.description.is_empty() {
            out.insert("description".to_owned(), Value::from(self.description));
        }
        if let Some(minimum) = self.minimum {
            out.insert("minimum".to_owned(), number_value(minimum));
        }
        if let Some(maximum) = self.maximum {
            out.insert("maximum".to_owned(), number_value(maximum));
        }
        if let Some(length) = self.min_length {
            out.insert("minLength".to_owned(), Value::from(length));
        }
        if let Some(count) = self.min_items {
            out.insert("minItems".to_owned(), Value::from(count));
        }
        if !self.choices.is_empty() {
            out.insert("enum".to_owned(), json!(self.choices));
        }
        if let Some(default) = &self.default {
            out.insert("default".to_owned(), default.clone());
        }
        match self.items.as_deref() {
            Some(ArrayItems::Kind(kind)) => {
                out.insert("items".to_owned(), json!({"type": kind.json_type()}));
            }
            Some(ArrayItems::Schema(schema)) => {
                out.insert("items".to_owned(), schema.to_json_schema());
            }
            None => {}
        }
        if let Some(kind) = self.value_kind {
            out.insert(
                "additionalProperties".to_owned(),
                json!({"type": kind.json_type()}),
            );
        }
        Value::Object(out)
    }
}

/// One violated constraint, identified by field and description.
///
/// Nested fields are reported in `parent[index].child` form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Offending parameter.
    pub field: String,
    /// Human-readable description of the violated constraint.
    pub constraint: String,
}

impl Violation {
    fn new(field: impl Into<String>, constraint: impl Into<String>) -> Self {
        Self { field: field.into(), constraint: constraint.into() }
    }
}

/// Parameter contract of one tool: an ordered set of named [`ParamSpec`]s.
#[derive(Debug, Clone, Default)]
pub struct ToolSchema {
    fields: Vec<(&'static str, ParamSpec)>,
}

impl ToolSchema {
    /// Empty contract (tools taking no arguments).
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one named parameter to the contract.
    pub fn field(mut self, name: &'static str, spec: ParamSpec) -> Self {
        self.fields.push((name, spec));
        self
    }

    /// Validates raw caller arguments against the contract.
    ///
    /// On success, returns the normalized argument map: defaults substituted
    /// (including inside array elements), unknown keys stripped. On failure,
    /// returns the first [`Violation`] encountered in declaration order.
    ///
    /// # Errors
    ///
    /// Returns a [`Violation`] for a missing required field, a type mismatch,
    /// an out-of-range value, a too-short string or array, or a value outside
    /// an enumerated set.
    pub fn validate(
        &self,
        args: Option<&Map<String, Value>>,
    ) -> std::result::Result<Map<String, Value>, Violation> {
        let mut normalized = Map::new();
        for (name, spec) in &self.fields {
            match args.and_then(|args| args.get(*name)) {
                Some(value) => {
                    let value = check_value(name, spec, value)?;
                    normalized.insert((*name).to_owned(), value);
                }
                None => {
                    if let Some(default) = &spec.default {
                        normalized.insert((*name).to_owned(), default.clone());
                    } else if spec.required {
                        return Err(Violation::new(*name, "required parameter is missing"));
                    }
                }
            }
        }
        Ok(normalized)
    }

    /// JSON Schema object describing this contract, served on tool discovery.
    pub fn to_json_schema(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();
        for (name, spec) in &self.fields {
            properties.insert((*name).to_owned(), spec.json_schema());
            if spec.required {
                required.push(Value::from(*name));
            }
        }
        let mut schema = Map::new();
        schema.insert("type".to_owned(), Value::from("object"));
        schema.insert("properties".to_owned(), Value::Object(properties));
        if !required.is_empty() {
            schema.insert("required".to_owned(), Value::Array(required));
        }
        Value::Object(schema)
    }
}

/// Checks one supplied value against its spec, returning the normalized value.
fn check_value(name: &str, spec: &ParamSpec, value: &Value) -> Result<Value, Violation> {
    if !spec.kind.matches(value) {
        return Err(Violation::new(name, format!("expected {}", spec.kind.json_type())));
    }

    if let Some(number) = value.as_f64() {
        if let Some(minimum) = spec.minimum {
            if number < minimum {
                return Err(Violation::new(name, format!("must be >= {minimum}")));
            }
        }
        if let Some(maximum) = spec.maximum {
            if number > maximum {
                return Err(Violation::new(name, format!("must be <= {maximum}")));
            }
        }
    }

    if let Some(text) = value.as_str() {
        if let Some(length) = spec.min_length {
            if text.chars().count() < length {
                return Err(Violation::new(
                    name,
                    format!("must be at least {length} character(s) long"),
                ));
            }
        }
        if !spec.choices.is_empty() && !spec.choices.contains(&text) {
            return Err(Violation::new(
                name,
                format!("must be one of: {}", spec.choices.join(", ")),
            ));
        }
    }

    if let Some(elements) = value.as_array() {
        if let Some(count) = spec.min_items {
            if elements.len() < count {
                return Err(Violation::new(
                    name,
                    format!("must contain at least {count} element(s)"),
                ));
            }
        }
        match spec.items.as_deref() {
            Some(ArrayItems::Kind(kind)) => {
                for (index, element) in elements.iter().enumerate() {
                    if !kind.matches(element) {
                        return Err(Violation::new(
                            format!("{name}[{index}]"),
                            format!("expected {}", kind.json_type()),
                        ));
                    }
                }
            }
            Some(ArrayItems::Schema(schema)) => {
                let mut normalized = Vec::with_capacity(elements.len());
                for (index, element) in elements.iter().enumerate() {
                    let Some(fields) = element.as_object() else {
                        return Err(Violation::new(format!("{name}[{index}]"), "expected object"));
                    };
                    let element = schema.validate(Some(fields)).map_err(|inner| {
                        Violation::new(format!("{name}[{index}].{}", inner.field), inner.constraint)
                    })?;
                    normalized.push(Value::Object(element));
                }
                return Ok(Value::Array(normalized));
            }
            None => {}
        }
    }

    if let (Some(fields), Some(kind)) = (value.as_object(), spec.value_kind) {
        for (key, entry) in fields {
            if !kind.matches(entry) {
                return Err(Violation::new(
                    format!("{name}.{key}"),
                    format!("expected {}", kind.json_type()),
                ));
            }
        }
    }

    Ok(value.clone())
}

/// Renders a bound as a JSON integer when it is whole, a float otherwise.
fn number_value(number: f64) -> Value {
    if number.fract() == 0.0 && number.abs() < 9_007_199_254_740_992.0 {
        #[allow(clippy::cast_possible_truncation, reason = "fract() == 0.0 checked above")]
        let whole = number as i64;
        Value::from(whole)
    } else {
        Value::from(number)
    }
}
