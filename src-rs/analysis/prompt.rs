use serde_json::{Map, Value};

const INSTRUCTIONS: &str = r#"The attached image is a hand drawing. It contains mathematical expressions, equations, a graphical problem, or a picture of an idea. Work out what it shows.
Evaluate arithmetic with the usual precedence: parentheses first, then exponents, then multiplication and division from left to right, then addition and subtraction from left to right.

Exactly one of the following five cases applies to the drawing:
1. A plain expression such as 2 + 2, 3 * 4, 5 / 6 or 7 - 8. Evaluate it and answer with a list holding one object: [{"expr": "<the expression>", "result": <the value>}].
2. A system of equations such as x^2 + 2x + 1 = 0 or 3y + 4x = 0. Solve for every unknown and answer with one object per unknown, each marked as an assignment: [{"expr": "x", "result": 2, "assign": true}, {"expr": "y", "result": 5, "assign": true}].
3. Variable assignments such as x = 4, y = 5. Answer with one object per variable, the variable name as "expr", its value as "result", and "assign": true.
4. A word problem drawn as a picture. Answer with a list holding one object: [{"expr": "<the problem>", "result": <the answer>}].
5. An abstract concept such as love, hate, jealousy or patriotism. Answer with a list holding one object where "expr" explains the drawing and "result" names the concept."#;

/// Prompt text sent next to the image. `variables` are values the user
/// assigned earlier and may be referenced by the drawing.
pub fn render_prompt(variables: &Map<String, Value>) -> String {
    let vars = Value::Object(variables.clone());
    format!(
        "{}\n\nVariables the user has already assigned, use them where they appear: {}\n\nReply with a valid JSON array of objects and nothing else.",
        INSTRUCTIONS, vars
    )
}
