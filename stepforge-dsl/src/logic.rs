use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Number, Value};

/// Comparison applied by a Choice state. Serializes to the engine's
/// flattened encoding: `{"Variable": "$.x", "<Operator>": <value>}`, with
/// `And` / `Or` / `Not` nesting sub-conditions.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    StringEquals { variable: String, value: String },
    NumericEquals { variable: String, value: Number },
    NumericGreaterThan { variable: String, value: Number },
    NumericGreaterThanEquals { variable: String, value: Number },
    NumericLessThan { variable: String, value: Number },
    NumericLessThanEquals { variable: String, value: Number },
    BooleanEquals { variable: String, value: bool },
    IsPresent { variable: String, value: bool },
    And(Vec<Condition>),
    Or(Vec<Condition>),
    Not(Box<Condition>),
}

impl Condition {
    pub fn string_equals(variable: impl Into<String>, value: impl Into<String>) -> Self {
        Condition::StringEquals {
            variable: variable.into(),
            value: value.into(),
        }
    }

    pub fn numeric_equals(variable: impl Into<String>, value: impl Into<Number>) -> Self {
        Condition::NumericEquals {
            variable: variable.into(),
            value: value.into(),
        }
    }

    pub fn numeric_greater_than(variable: impl Into<String>, value: impl Into<Number>) -> Self {
        Condition::NumericGreaterThan {
            variable: variable.into(),
            value: value.into(),
        }
    }

    pub fn numeric_less_than(variable: impl Into<String>, value: impl Into<Number>) -> Self {
        Condition::NumericLessThan {
            variable: variable.into(),
            value: value.into(),
        }
    }

    pub fn boolean_equals(variable: impl Into<String>, value: bool) -> Self {
        Condition::BooleanEquals {
            variable: variable.into(),
            value,
        }
    }

    pub fn is_present(variable: impl Into<String>, value: bool) -> Self {
        Condition::IsPresent {
            variable: variable.into(),
            value,
        }
    }

    pub fn and(conditions: Vec<Condition>) -> Self {
        Condition::And(conditions)
    }

    pub fn or(conditions: Vec<Condition>) -> Self {
        Condition::Or(conditions)
    }

    pub fn not(condition: Condition) -> Self {
        Condition::Not(Box::new(condition))
    }

    fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        match self {
            Condition::StringEquals { variable, value } => {
                map.insert("Variable".to_string(), Value::String(variable.clone()));
                map.insert("StringEquals".to_string(), Value::String(value.clone()));
            }
            Condition::NumericEquals { variable, value } => {
                map.insert("Variable".to_string(), Value::String(variable.clone()));
                map.insert("NumericEquals".to_string(), Value::Number(value.clone()));
            }
            Condition::NumericGreaterThan { variable, value } => {
                map.insert("Variable".to_string(), Value::String(variable.clone()));
                map.insert("NumericGreaterThan".to_string(), Value::Number(value.clone()));
            }
            Condition::NumericGreaterThanEquals { variable, value } => {
                map.insert("Variable".to_string(), Value::String(variable.clone()));
                map.insert(
                    "NumericGreaterThanEquals".to_string(),
                    Value::Number(value.clone()),
                );
            }
            Condition::NumericLessThan { variable, value } => {
                map.insert("Variable".to_string(), Value::String(variable.clone()));
                map.insert("NumericLessThan".to_string(), Value::Number(value.clone()));
            }
            Condition::NumericLessThanEquals { variable, value } => {
                map.insert("Variable".to_string(), Value::String(variable.clone()));
                map.insert(
                    "NumericLessThanEquals".to_string(),
                    Value::Number(value.clone()),
                );
            }
            Condition::BooleanEquals { variable, value } => {
                map.insert("Variable".to_string(), Value::String(variable.clone()));
                map.insert("BooleanEquals".to_string(), Value::Bool(*value));
            }
            Condition::IsPresent { variable, value } => {
                map.insert("Variable".to_string(), Value::String(variable.clone()));
                map.insert("IsPresent".to_string(), Value::Bool(*value));
            }
            Condition::And(conditions) => {
                map.insert(
                    "And".to_string(),
                    Value::Array(conditions.iter().map(|c| Value::Object(c.to_map())).collect()),
                );
            }
            Condition::Or(conditions) => {
                map.insert(
                    "Or".to_string(),
                    Value::Array(conditions.iter().map(|c| Value::Object(c.to_map())).collect()),
                );
            }
            Condition::Not(condition) => {
                map.insert("Not".to_string(), Value::Object(condition.to_map()));
            }
        }
        map
    }

    fn from_map(map: &Map<String, Value>) -> Result<Self, String> {
        if let Some(value) = map.get("And") {
            return Ok(Condition::And(Self::condition_array(value, "And")?));
        }
        if let Some(value) = map.get("Or") {
            return Ok(Condition::Or(Self::condition_array(value, "Or")?));
        }
        if let Some(value) = map.get("Not") {
            let inner = value
                .as_object()
                .ok_or_else(|| "'Not' must hold a condition object".to_string())?;
            return Ok(Condition::Not(Box::new(Self::from_map(inner)?)));
        }

        let variable = map
            .get("Variable")
            .and_then(Value::as_str)
            .ok_or_else(|| "condition is missing 'Variable'".to_string())?
            .to_string();

        if let Some(value) = map.get("StringEquals") {
            let value = value
                .as_str()
                .ok_or_else(|| "'StringEquals' expects a string".to_string())?;
            return Ok(Condition::string_equals(variable, value));
        }
        for (operator, build) in NUMERIC_OPERATORS {
            if let Some(value) = map.get(*operator) {
                let number = value
                    .as_number()
                    .ok_or_else(|| format!("'{}' expects a number", operator))?;
                return Ok(build(variable, number.clone()));
            }
        }
        if let Some(value) = map.get("BooleanEquals") {
            let value = value
                .as_bool()
                .ok_or_else(|| "'BooleanEquals' expects a boolean".to_string())?;
            return Ok(Condition::boolean_equals(variable, value));
        }
        if let Some(value) = map.get("IsPresent") {
            let value = value
                .as_bool()
                .ok_or_else(|| "'IsPresent' expects a boolean".to_string())?;
            return Ok(Condition::is_present(variable, value));
        }

        Err(format!(
            "no supported comparison operator in condition for '{}'",
            variable
        ))
    }

    fn condition_array(value: &Value, operator: &str) -> Result<Vec<Condition>, String> {
        value
            .as_array()
            .ok_or_else(|| format!("'{}' must hold an array of conditions", operator))?
            .iter()
            .map(|item| {
                item.as_object()
                    .ok_or_else(|| format!("'{}' items must be condition objects", operator))
                    .and_then(Self::from_map)
            })
            .collect()
    }
}

type NumericBuild = fn(String, Number) -> Condition;

const NUMERIC_OPERATORS: &[(&str, NumericBuild)] = &[
    ("NumericEquals", |variable, value| Condition::NumericEquals { variable, value }),
    ("NumericGreaterThan", |variable, value| Condition::NumericGreaterThan { variable, value }),
    ("NumericGreaterThanEquals", |variable, value| Condition::NumericGreaterThanEquals {
        variable,
        value,
    }),
    ("NumericLessThan", |variable, value| Condition::NumericLessThan { variable, value }),
    ("NumericLessThanEquals", |variable, value| Condition::NumericLessThanEquals {
        variable,
        value,
    }),
];

impl Serialize for Condition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Value::Object(self.to_map()).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Condition {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = Map::<String, Value>::deserialize(deserializer)?;
        Condition::from_map(&map).map_err(D::Error::custom)
    }
}

/// One rule of a Choice state: when `condition` holds, route to `next`.
/// On the wire the condition keys and `"Next"` share one object.
#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceRule {
    pub condition: Condition,
    pub next: String,
}

impl ChoiceRule {
    pub fn new(condition: Condition, next: impl Into<String>) -> Self {
        ChoiceRule {
            condition,
            next: next.into(),
        }
    }
}

impl Serialize for ChoiceRule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = self.condition.to_map();
        map.insert("Next".to_string(), Value::String(self.next.clone()));
        Value::Object(map).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ChoiceRule {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut map = Map::<String, Value>::deserialize(deserializer)?;
        let next = map
            .remove("Next")
            .and_then(|v| v.as_str().map(str::to_string))
            .ok_or_else(|| D::Error::custom("choice rule is missing 'Next'"))?;
        let condition = Condition::from_map(&map).map_err(D::Error::custom)?;
        Ok(ChoiceRule { condition, next })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numeric_greater_than_wire_shape() {
        let rule = ChoiceRule::new(
            Condition::numeric_greater_than("$.RetryCount", 0u32),
            "WaitPath",
        );
        assert_eq!(
            serde_json::to_value(&rule).unwrap(),
            json!({
                "Variable": "$.RetryCount",
                "NumericGreaterThan": 0,
                "Next": "WaitPath"
            })
        );
    }

    #[test]
    fn test_string_equals_roundtrip() {
        let wire = json!({
            "Variable": "$.VerifyResult.Status",
            "StringEquals": "SUCCEEDED",
            "Next": "Succeeded"
        });
        let rule: ChoiceRule = serde_json::from_value(wire.clone()).unwrap();
        assert_eq!(rule.next, "Succeeded");
        assert_eq!(
            rule.condition,
            Condition::string_equals("$.VerifyResult.Status", "SUCCEEDED")
        );
        assert_eq!(serde_json::to_value(&rule).unwrap(), wire);
    }

    #[test]
    fn test_combinators_roundtrip() {
        let condition = Condition::and(vec![
            Condition::is_present("$.Status", true),
            Condition::not(Condition::string_equals("$.Status", "FAILED")),
        ]);
        let wire = serde_json::to_value(&condition).unwrap();
        assert_eq!(
            wire,
            json!({
                "And": [
                    { "Variable": "$.Status", "IsPresent": true },
                    { "Not": { "Variable": "$.Status", "StringEquals": "FAILED" } }
                ]
            })
        );
        let de: Condition = serde_json::from_value(wire).unwrap();
        assert_eq!(de, condition);
    }

    #[test]
    fn test_missing_operator_is_rejected() {
        let wire = json!({ "Variable": "$.x", "Next": "Y" });
        assert!(serde_json::from_value::<ChoiceRule>(wire).is_err());
    }
}
