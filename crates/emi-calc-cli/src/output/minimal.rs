use serde_json::Value;

use super::display_value;

/// Headline figure of each command, as JSON pointers into the result.
const PRIORITY_POINTERS: [&str; 9] = [
    "/emi",
    "/summary/emi",
    "/base/emi",
    "/required_investment",
    "/maturity_amount",
    "/realistic/maturity_amount",
    "/scenarios/realistic/maturity_amount",
    "/real_value",
    "/balance",
];

/// Print just the key answer value from the output.
///
/// Looks for the first well-known figure present, then falls back to the
/// first field. Row lists print their last row's headline.
pub fn print_minimal(value: &Value) {
    println!("{}", minimal_text(value));
}

fn minimal_text(value: &Value) -> String {
    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let target = match result {
        Value::Array(rows) => match rows.last() {
            Some(last) => last,
            None => return String::new(),
        },
        other => other,
    };

    if let Some(found) = PRIORITY_POINTERS
        .iter()
        .filter_map(|p| target.pointer(p))
        .find(|v| !v.is_null())
    {
        return display_value(found, true);
    }

    match target {
        Value::Object(map) => map
            .iter()
            .next()
            .map(|(key, val)| format!("{}: {}", key, display_value(val, true)))
            .unwrap_or_default(),
        other => display_value(other, true),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_uses_nested_emi() {
        let value = json!({
            "result": { "summary": { "emi": "21695.580834" }, "months_to_payoff": 240 },
            "warnings": []
        });
        assert_eq!(minimal_text(&value), "21695.58");
    }

    #[test]
    fn test_plan_prefers_required_investment() {
        let value = json!({
            "result": {
                "required_investment": "145883.1",
                "scenarios": { "realistic": { "maturity_amount": "200000" } }
            }
        });
        assert_eq!(minimal_text(&value), "145883.1");
    }

    #[test]
    fn test_schedule_prints_final_balance() {
        let value = json!([{ "month": 1, "balance": "10" }, { "month": 2, "balance": "0" }]);
        assert_eq!(minimal_text(&value), "0");
    }

    #[test]
    fn test_fallback_to_first_field() {
        assert_eq!(minimal_text(&json!({ "id": "fd" })), "id: fd");
    }
}
