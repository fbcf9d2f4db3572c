//! Request dispatch and tool handlers

use crate::config::ServerConfig;
use crate::protocol::{McpError, McpRequest, McpResponse};
use chronos::Chronos;
use chronos_core::{ChronosError, Value};
use chronos_currency::RateProvider;
use chronos_timer::{AlarmPlayer, Countdown, CountdownHandle, PresetSound, SoundSource, Stopwatch, StopwatchHandle};
use serde_json::{json, Value as JsonValue};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;

pub const PROTOCOL_VERSION: &str = "2025-11-25";
pub const SERVER_NAME: &str = "chronos";
pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct Server {
    chronos: Chronos,
    stopwatch: Mutex<StopwatchHandle>,
    countdown: Mutex<CountdownHandle>,
    decimal_separator: char,
}

impl Server {
    pub fn new(config: &ServerConfig, rates: Arc<dyn RateProvider>, player: Arc<dyn AlarmPlayer>) -> Self {
        Self {
            chronos: Chronos::with_standard_library(rates),
            stopwatch: Mutex::new(StopwatchHandle::new()),
            countdown: Mutex::new(CountdownHandle::new(player)),
            decimal_separator: config.decimal_separator,
        }
    }

    /// Handle one protocol line. `None` when no reply is due (notifications).
    pub async fn handle_line(&self, line: &str) -> Option<String> {
        let request: McpRequest = match serde_json::from_str(line) {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(error = %e, "unparseable request");
                return encode(&McpResponse::new(None, Err(McpError::parse_error(e))));
            }
        };

        tracing::debug!(method = %request.method, "processing");
        let response = self.handle_request(&request).await;

        if request.id.is_none() {
            tracing::debug!(method = %request.method, "notification processed (no response)");
            return None;
        }
        encode(&response)
    }

    async fn handle_request(&self, request: &McpRequest) -> McpResponse {
        let result = match request.method.as_str() {
            "initialize" => handle_initialize(&request.params),
            "initialized" | "notifications/initialized" | "ping" => Ok(json!({})),
            "tools/list" => Ok(tools_list()),
            "tools/call" => self.handle_tool_call(&request.params).await,
            _ => Err(McpError::method_not_found(&request.method)),
        };
        McpResponse::new(request.id.clone(), result)
    }

    async fn handle_tool_call(&self, params: &Option<JsonValue>) -> Result<JsonValue, McpError> {
        let params = params
            .as_ref()
            .ok_or_else(|| McpError::invalid_params("Missing params"))?;

        let name = params
            .get("name")
            .and_then(|v| v.as_str())
            .ok_or_else(|| McpError::invalid_params("Missing tool name"))?;

        let args = params.get("arguments").cloned().unwrap_or(json!({}));

        match name {
            "convert" => self.tool_convert(&args),
            "list_units" => self.tool_list_units(&args),
            "bmi" => self.tool_bmi(&args),
            "convert_currency" => self.tool_convert_currency(&args).await,
            "calculate" => self.tool_calculate(&args),
            "stopwatch" => self.tool_stopwatch(&args).await,
            "countdown" => self.tool_countdown(&args).await,
            "chronos" => self.tool_help(&args),
            "list_functions" => self.tool_list_functions(&args),
            _ => Err(McpError::invalid_params(format!("Unknown tool: {}", name))),
        }
    }

    // ============ conversions ============

    fn tool_convert(&self, args: &JsonValue) -> Result<JsonValue, McpError> {
        let value = arg_input(args, "value").ok_or_else(|| McpError::invalid_params("Missing value argument"))?;

        let call_args = match (args.get("query"), args.get("from"), args.get("to")) {
            (Some(JsonValue::String(query)), _, _) => vec![value, Value::Text(query.clone())],
            (_, Some(JsonValue::String(from)), Some(JsonValue::String(to))) => {
                let mut call_args = vec![value, Value::Text(from.clone()), Value::Text(to.clone())];
                if let Some(dim) = arg_str(args, "dimension") {
                    call_args.push(Value::Text(dim.to_string()));
                }
                call_args
            }
            _ => {
                return Err(McpError::invalid_params("Expected 'from' and 'to', or 'query' (e.g. \"m -> ft\")"));
            }
        };

        let result = self.chronos.call("convert", &call_args);
        let text = match (result.get("formatted"), result.get("to")) {
            (Value::Text(formatted), Value::Text(to)) => format!("{} {}", formatted, to),
            _ => render_text(&result),
        };
        Ok(tool_result(&result, text))
    }

    fn tool_list_units(&self, args: &JsonValue) -> Result<JsonValue, McpError> {
        let result = match arg_str(args, "dimension") {
            Some(dim) => self.chronos.call("list_units", &[Value::Text(dim.to_string())]),
            None => self.chronos.call("list_dimensions", &[]),
        };
        let text = render_text(&result);
        Ok(tool_result(&result, text))
    }

    fn tool_bmi(&self, args: &JsonValue) -> Result<JsonValue, McpError> {
        let weight = arg_input(args, "weight").ok_or_else(|| McpError::invalid_params("Missing weight argument"))?;
        let height = arg_input(args, "height").ok_or_else(|| McpError::invalid_params("Missing height argument"))?;

        let result = self.chronos.call("bmi", &[weight, height]);
        let text = match (result.get("formatted"), result.get("label")) {
            (Value::Text(formatted), Value::Text(label)) => format!("BMI {} ({})", formatted, label),
            _ => render_text(&result),
        };
        Ok(tool_result(&result, text))
    }

    async fn tool_convert_currency(&self, args: &JsonValue) -> Result<JsonValue, McpError> {
        let amount = match arg_input(args, "amount") {
            Some(Value::Text(s)) => s,
            Some(other) => other.to_string(),
            None => return Err(McpError::invalid_params("Missing amount argument")),
        };
        let from = arg_str(args, "from").unwrap_or("USD");
        let to = arg_str(args, "to").unwrap_or("BRL");

        let result = self.chronos.convert_currency(&amount, from, to).await;
        let text = match (result.get("formatted"), result.get("to")) {
            (Value::Text(formatted), Value::Text(to)) => format!("{} {}", formatted, to),
            _ => render_text(&result),
        };
        Ok(tool_result(&result, text))
    }

    fn tool_calculate(&self, args: &JsonValue) -> Result<JsonValue, McpError> {
        let keys = arg_str(args, "keys").ok_or_else(|| McpError::invalid_params("Missing keys argument"))?;
        let separator = arg_str(args, "separator")
            .map(str::to_string)
            .unwrap_or_else(|| self.decimal_separator.to_string());

        let result = self.chronos.call("calculate", &[Value::Text(keys.to_string()), Value::Text(separator)]);
        let text = match (result.get("display"), result.get("expression")) {
            (Value::Text(display), Value::Text(expression)) => format!("{}\n{}", expression, display),
            (Value::Text(display), _) => display,
            _ => render_text(&result),
        };
        Ok(tool_result(&result, text))
    }

    // ============ timers ============

    async fn tool_stopwatch(&self, args: &JsonValue) -> Result<JsonValue, McpError> {
        let action = arg_str(args, "action").unwrap_or("status");
        let mut stopwatch = self.stopwatch.lock().await;

        let (snapshot, lap) = match action {
            "start" => (stopwatch.start().await, None),
            "stop" => (stopwatch.stop().await, None),
            "reset" => (stopwatch.reset().await, None),
            "lap" => {
                let lap = stopwatch.lap().await;
                (stopwatch.snapshot().await, lap)
            }
            "status" => (stopwatch.snapshot().await, None),
            other => {
                return Err(McpError::invalid_params(format!("Unknown stopwatch action: {}", other))
                    .with_data(json!({ "actions": ["start", "stop", "reset", "lap", "status"] })));
            }
        };

        let mut data = stopwatch_json(&snapshot);
        data["lap"] = lap.clone().map(JsonValue::String).unwrap_or(JsonValue::Null);
        let text = match lap {
            Some(lap) => format!("Lap {}: {}", snapshot.laps().len(), lap),
            None if action == "lap" => format!("{} (not running, no lap recorded)", snapshot.formatted()),
            None => snapshot.formatted(),
        };

        Ok(json!({
            "content": [{ "type": "text", "text": text }],
            "data": data,
            "isError": false
        }))
    }

    async fn tool_countdown(&self, args: &JsonValue) -> Result<JsonValue, McpError> {
        let action = arg_str(args, "action").unwrap_or("status");
        let mut countdown = self.countdown.lock().await;

        let snapshot = match action {
            "start" => countdown.start().await,
            "stop" => countdown.stop().await,
            "reset" => countdown.reset().await,
            "dismiss" => countdown.dismiss().await,
            "status" => countdown.snapshot().await,
            "set" => {
                let hours = arg_u64(args, "hours")?;
                let minutes = arg_u64(args, "minutes")?;
                let seconds = arg_u64(args, "seconds")?;
                match countdown.set_duration(hours, minutes, seconds).await {
                    Ok(snapshot) => snapshot,
                    Err(e) => {
                        return Err(McpError::invalid_params(e.message.clone())
                            .with_data(Value::Error(e).to_json()));
                    }
                }
            }
            "sound" => countdown.set_sound(parse_sound(arg_str(args, "sound"))).await,
            other => {
                return Err(McpError::invalid_params(format!("Unknown countdown action: {}", other))
                    .with_data(json!({
                        "actions": ["start", "stop", "reset", "set", "sound", "dismiss", "status"]
                    })));
            }
        };

        let text = if snapshot.alarm_active() {
            format!("{} (alarm sounding)", snapshot.formatted())
        } else {
            snapshot.formatted()
        };

        Ok(json!({
            "content": [{ "type": "text", "text": text }],
            "data": countdown_json(&snapshot),
            "isError": false
        }))
    }

    // ============ documentation ============

    fn tool_help(&self, args: &JsonValue) -> Result<JsonValue, McpError> {
        let help = self.chronos.help(arg_str(args, "name"));
        Ok(tool_result(&help, format_help(&help)))
    }

    fn tool_list_functions(&self, args: &JsonValue) -> Result<JsonValue, McpError> {
        let functions = self.chronos.list_functions(arg_str(args, "category"));
        Ok(tool_result(&functions, "Functions listed".to_string()))
    }
}

/// Serialize a response, answering with an internal error if that fails
fn encode(response: &McpResponse) -> Option<String> {
    match serde_json::to_string(response) {
        Ok(s) => Some(s),
        Err(e) => {
            tracing::error!(error = %e, "failed to encode response");
            let fallback = McpResponse::new(
                response.id.clone(),
                Err(McpError::internal(ChronosError::internal(e.to_string()))),
            );
            serde_json::to_string(&fallback).ok()
        }
    }
}

fn handle_initialize(params: &Option<JsonValue>) -> Result<JsonValue, McpError> {
    let client_info = params
        .as_ref()
        .and_then(|p| p.get("clientInfo"))
        .and_then(|c| c.get("name"))
        .and_then(|n| n.as_str())
        .unwrap_or("unknown");

    let client_protocol = params
        .as_ref()
        .and_then(|p| p.get("protocolVersion"))
        .and_then(|v| v.as_str())
        .unwrap_or(PROTOCOL_VERSION);

    tracing::info!(client = client_info, protocol = client_protocol, "client connected");

    Ok(json!({
        "protocolVersion": client_protocol,
        "serverInfo": {
            "name": SERVER_NAME,
            "version": SERVER_VERSION,
            "description": "Unit, BMI and currency conversion, a calculator, stopwatch and countdown"
        },
        "capabilities": {
            "tools": { "listChanged": false }
        }
    }))
}

fn tools_list() -> JsonValue {
    json!({
        "tools": [
            {
                "name": "convert",
                "description": "Convert a value between units of length, weight, temperature, pressure, energy, area, volume, speed, force or time.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "value": { "type": ["string", "number"], "description": "Value as typed, e.g. \"1.5\"" },
                        "from": { "type": "string", "description": "Source unit id or symbol" },
                        "to": { "type": "string", "description": "Target unit id or symbol" },
                        "dimension": { "type": "string", "description": "Dimension to resolve units in (optional)" },
                        "query": { "type": "string", "description": "Unit pair instead of from/to, e.g. \"km -> mi\"" }
                    },
                    "required": ["value"]
                }
            },
            {
                "name": "list_units",
                "description": "List units of a dimension, or every dimension when none is given.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "dimension": { "type": "string", "description": "e.g. length, temperature" }
                    }
                }
            },
            {
                "name": "bmi",
                "description": "Body mass index from weight (kg) and height (m) with its classification.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "weight": { "type": ["string", "number"], "description": "Weight in kilograms" },
                        "height": { "type": ["string", "number"], "description": "Height in meters" }
                    },
                    "required": ["weight", "height"]
                }
            },
            {
                "name": "convert_currency",
                "description": "Convert an amount between USD, BRL and EUR at the current exchange rate.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "amount": { "type": ["string", "number"], "description": "Amount, must be greater than zero" },
                        "from": { "type": "string", "enum": ["USD", "BRL", "EUR"], "description": "Default USD" },
                        "to": { "type": "string", "enum": ["USD", "BRL", "EUR"], "description": "Default BRL" }
                    },
                    "required": ["amount"]
                }
            },
            {
                "name": "calculate",
                "description": "Press keys on a four-function calculator: digits, . + - * / = % sqrt, clear, backspace.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "keys": { "type": "string", "description": "e.g. \"12+7=\" or \"9 sqrt\"" },
                        "separator": { "type": "string", "enum": [".", ","], "description": "Decimal separator for the display" }
                    },
                    "required": ["keys"]
                }
            },
            {
                "name": "stopwatch",
                "description": "Control the shared stopwatch.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "action": { "type": "string", "enum": ["start", "stop", "reset", "lap", "status"] }
                    }
                }
            },
            {
                "name": "countdown",
                "description": "Control the shared countdown (default 01:00:00). The alarm sounds once at zero.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "action": { "type": "string", "enum": ["start", "stop", "reset", "set", "sound", "dismiss", "status"] },
                        "hours": { "type": "integer" },
                        "minutes": { "type": "integer" },
                        "seconds": { "type": "integer" },
                        "sound": { "type": "string", "description": "Preset name (e.g. \"Sonata Feliz\"), a file path, or \"none\"" }
                    }
                }
            },
            {
                "name": "chronos",
                "description": "Get documentation for a function, or general help about Chronos.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "name": { "type": "string", "description": "Function name. Omit for general help." }
                    }
                }
            },
            {
                "name": "list_functions",
                "description": "List all available functions, optionally by category.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "category": {
                            "type": "string",
                            "enum": ["units", "health", "calculator", "timer"]
                        }
                    }
                }
            }
        ]
    })
}

// ============ argument helpers ============

fn arg_str<'a>(args: &'a JsonValue, key: &str) -> Option<&'a str> {
    args.get(key).and_then(|v| v.as_str())
}

/// A raw numeric input: text is kept as typed, numbers become Numbers
fn arg_input(args: &JsonValue, key: &str) -> Option<Value> {
    match args.get(key)? {
        JsonValue::String(s) => Some(Value::Text(s.clone())),
        JsonValue::Number(n) => n.as_f64().map(Value::Number),
        _ => None,
    }
}

fn arg_u64(args: &JsonValue, key: &str) -> Result<u64, McpError> {
    match args.get(key) {
        None | Some(JsonValue::Null) => Ok(0),
        Some(v) => v
            .as_u64()
            .ok_or_else(|| McpError::invalid_params(format!("'{}' must be a non-negative integer", key))),
    }
}

fn parse_sound(raw: Option<&str>) -> Option<SoundSource> {
    let raw = raw?.trim();
    if raw.is_empty() || raw.eq_ignore_ascii_case("none") {
        return None;
    }
    Some(match PresetSound::from_name(raw) {
        Some(preset) => SoundSource::Preset(preset),
        None => SoundSource::Custom(PathBuf::from(raw)),
    })
}

// ============ rendering ============

fn tool_result(value: &Value, text: String) -> JsonValue {
    json!({
        "content": [{ "type": "text", "text": text }],
        "data": value.to_json(),
        "isError": value.is_error()
    })
}

fn render_text(value: &Value) -> String {
    match value {
        Value::Error(e) => match &e.suggestion {
            Some(s) => format!("Error: {} ({})", e.message, s),
            None => format!("Error: {}", e.message),
        },
        other => other.to_string(),
    }
}

fn format_help(help: &Value) -> String {
    match help {
        Value::Object(map) => {
            let mut out = String::new();
            if let Some(Value::Text(n)) = map.get("name") {
                out.push_str(&format!("# {}\n\n", n));
            }
            if let Some(Value::Text(d)) = map.get("description") {
                out.push_str(&format!("{}\n\n", d));
            }
            if let Some(Value::Text(u)) = map.get("usage") {
                out.push_str(&format!("**Usage:** `{}`\n\n", u));
            }
            out
        }
        other => render_text(other),
    }
}

fn stopwatch_json(s: &Stopwatch) -> JsonValue {
    json!({
        "state": s.state(),
        "elapsed_ms": s.elapsed_ms(),
        "formatted": s.formatted(),
        "laps": s.laps(),
    })
}

fn countdown_json(c: &Countdown) -> JsonValue {
    json!({
        "state": c.state(),
        "remaining_secs": c.remaining_secs(),
        "formatted": c.formatted(),
        "alarm_active": c.alarm_active(),
        "sound": c.sound().map(|s| json!({ "name": s.to_string(), "location": s.location() })),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chronos_currency::{Currency, StaticRates};
    use chronos_timer::LogAlarm;

    fn server() -> Server {
        let rates = StaticRates::new().with_rate(Currency::Usd, Currency::Brl, 5.0);
        Server::new(&ServerConfig::default(), Arc::new(rates), Arc::new(LogAlarm))
    }

    async fn call(server: &Server, line: &str) -> JsonValue {
        let reply = server.handle_line(line).await.unwrap();
        serde_json::from_str(&reply).unwrap()
    }

    async fn tool(server: &Server, name: &str, arguments: JsonValue) -> JsonValue {
        let request = json!({
            "jsonrpc": "2.0", "id": 1, "method": "tools/call",
            "params": { "name": name, "arguments": arguments }
        });
        call(server, &request.to_string()).await["result"].clone()
    }

    #[tokio::test]
    async fn test_initialize() {
        let s = server();
        let reply = call(&s, r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{"protocolVersion":"2024-11-05"}}"#).await;
        assert_eq!(reply["result"]["protocolVersion"], "2024-11-05");
        assert_eq!(reply["result"]["serverInfo"]["name"], "chronos");
    }

    #[tokio::test]
    async fn test_protocol_errors() {
        let s = server();
        let parse = call(&s, "{not json").await;
        assert_eq!(parse["error"]["code"], -32700);

        let method = call(&s, r#"{"jsonrpc":"2.0","id":2,"method":"resources/list"}"#).await;
        assert_eq!(method["error"]["code"], -32601);

        let params = call(&s, r#"{"jsonrpc":"2.0","id":3,"method":"tools/call"}"#).await;
        assert_eq!(params["error"]["code"], -32602);
    }

    #[tokio::test]
    async fn test_notification_gets_no_reply() {
        let s = server();
        assert!(s.handle_line(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#).await.is_none());
    }

    #[tokio::test]
    async fn test_tools_list_names() {
        let s = server();
        let reply = call(&s, r#"{"jsonrpc":"2.0","id":1,"method":"tools/list"}"#).await;
        let names: Vec<&str> = reply["result"]["tools"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["name"].as_str().unwrap())
            .collect();
        assert_eq!(
            names,
            ["convert", "list_units", "bmi", "convert_currency", "calculate", "stopwatch", "countdown", "chronos", "list_functions"]
        );
    }

    #[tokio::test]
    async fn test_convert_tool() {
        let s = server();
        let result = tool(&s, "convert", json!({ "value": "0", "from": "celsius", "to": "fahrenheit" })).await;
        assert_eq!(result["data"]["formatted"], "32.00");
        assert_eq!(result["isError"], false);

        let pair = tool(&s, "convert", json!({ "value": 1, "query": "kg -> lb" })).await;
        assert_eq!(pair["data"]["formatted"], "2.2046");

        let bad = tool(&s, "convert", json!({ "value": "abc", "from": "meter", "to": "foot" })).await;
        assert_eq!(bad["isError"], true);
        assert_eq!(bad["data"]["code"], "INVALID_NUMBER");
    }

    #[tokio::test]
    async fn test_bmi_and_currency_tools() {
        let s = server();
        let bmi = tool(&s, "bmi", json!({ "weight": 70, "height": 1.75 })).await;
        assert_eq!(bmi["data"]["formatted"], "22.86");

        let money = tool(&s, "convert_currency", json!({ "amount": "3" })).await;
        assert_eq!(money["data"]["formatted"], "15.00");

        let zero = tool(&s, "convert_currency", json!({ "amount": "0" })).await;
        assert_eq!(zero["data"]["code"], "NON_POSITIVE_VALUE");
    }

    #[tokio::test]
    async fn test_calculate_tool() {
        let s = server();
        let result = tool(&s, "calculate", json!({ "keys": "5+3=" })).await;
        assert_eq!(result["data"]["display"], "8");
        assert_eq!(result["content"][0]["text"], "8");
    }

    #[tokio::test(start_paused = true)]
    async fn test_stopwatch_tool() {
        let s = server();
        tool(&s, "stopwatch", json!({ "action": "start" })).await;
        tokio::time::sleep(std::time::Duration::from_millis(2005)).await;
        let lap = tool(&s, "stopwatch", json!({ "action": "lap" })).await;
        assert_eq!(lap["data"]["lap"], "00:00:02.00");

        let reset = tool(&s, "stopwatch", json!({ "action": "reset" })).await;
        assert_eq!(reset["data"]["state"], "idle");
        assert_eq!(reset["data"]["laps"], json!([]));
    }

    #[tokio::test(start_paused = true)]
    async fn test_countdown_tool() {
        let s = server();
        let status = tool(&s, "countdown", json!({})).await;
        assert_eq!(status["data"]["formatted"], "01:00:00");

        tool(&s, "countdown", json!({ "action": "set", "seconds": 2 })).await;
        tool(&s, "countdown", json!({ "action": "sound", "sound": "Velhos Amigos" })).await;
        tool(&s, "countdown", json!({ "action": "start" })).await;
        tokio::time::sleep(std::time::Duration::from_millis(2500)).await;

        let expired = tool(&s, "countdown", json!({ "action": "status" })).await;
        assert_eq!(expired["data"]["state"], "expired");
        assert_eq!(expired["data"]["alarm_active"], true);
        assert_eq!(expired["data"]["sound"]["location"], "/sounds/velhos_amigos.mp3");

        let dismissed = tool(&s, "countdown", json!({ "action": "dismiss" })).await;
        assert_eq!(dismissed["data"]["alarm_active"], false);
    }

    #[tokio::test]
    async fn test_countdown_set_overflow_is_invalid_params() {
        let s = server();
        let request = json!({
            "jsonrpc": "2.0", "id": 4, "method": "tools/call",
            "params": { "name": "countdown", "arguments": { "action": "set", "hours": u64::MAX } }
        });
        let reply = call(&s, &request.to_string()).await;
        assert_eq!(reply["error"]["code"], -32602);
        assert_eq!(reply["error"]["data"]["code"], "INVALID_FORMAT");

        let status = tool(&s, "countdown", json!({ "action": "status" })).await;
        assert_eq!(status["data"]["formatted"], "01:00:00");
    }

    #[test]
    fn test_encode() {
        let response = McpResponse::new(Some(json!(7)), Ok(json!({})));
        let encoded: JsonValue = serde_json::from_str(&encode(&response).unwrap()).unwrap();
        assert_eq!(encoded["id"], 7);
    }

    #[tokio::test]
    async fn test_unknown_action() {
        let s = server();
        let request = json!({
            "jsonrpc": "2.0", "id": 9, "method": "tools/call",
            "params": { "name": "countdown", "arguments": { "action": "snooze" } }
        });
        let reply = call(&s, &request.to_string()).await;
        assert_eq!(reply["error"]["code"], -32602);
    }

    #[test]
    fn test_parse_sound() {
        assert_eq!(parse_sound(None), None);
        assert_eq!(parse_sound(Some("none")), None);
        assert_eq!(parse_sound(Some("pássaros")), Some(SoundSource::Preset(PresetSound::Passaros)));
        assert_eq!(
            parse_sound(Some("/home/me/ring.mp3")),
            Some(SoundSource::Custom(PathBuf::from("/home/me/ring.mp3")))
        );
    }
}
