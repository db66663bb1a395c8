//! Route dispatch: URI family + method → core operation.
//!
//! The URI family (`/coffee/...` vs `/tea/...`) selects the commanded
//! beverage for BREW; every other routing decision is mechanical. No
//! protocol semantics live here: refusal, mismatch, and depletion are all
//! the engine's verdicts, passed through.

use super::request::{parse_additions, Request};
use super::response::Response;
use super::{PROTOCOL, RFCS};
use crate::core::{Additions, Beverage, StatusCode};
use crate::engine::{BrewEngine, MilkAck};
use crate::registry::RegistryError;
use serde_json::{json, Value};

/// Addition listings annotate decaf with the canonical refusal.
const DECAF_NOTE: &str = "NOT_ACCEPTABLE — What's the point? (RFC 2324 §2.1.1)";

/// Dispatch one parsed request against the engine.
pub fn dispatch(engine: &BrewEngine, request: &Request) -> Response {
    let segments: Vec<&str> = request.path.split('/').filter(|s| !s.is_empty()).collect();
    let family = segments.first().copied().and_then(beverage_for);
    let method = request.method.as_str();

    match (family, segments.as_slice()) {
        (_, []) => match method {
            "GET" => registry_view(engine),
            _ => method_not_allowed(&["GET"]),
        },
        (Some(beverage), [_, pot_id]) => match method {
            "BREW" | "POST" => brew(engine, beverage, pot_id, request),
            _ => method_not_allowed(&["BREW", "POST"]),
        },
        (Some(_), [_, pot_id, "status"]) => match method {
            "GET" => status(engine, pot_id),
            _ => method_not_allowed(&["GET"]),
        },
        (Some(_), [_, pot_id, "history"]) => match method {
            "GET" => history(engine, pot_id),
            _ => method_not_allowed(&["GET"]),
        },
        (Some(_), [_, pot_id, "additions"]) => match method {
            "PROPFIND" => list_additions(engine, pot_id),
            _ => method_not_allowed(&["PROPFIND"]),
        },
        (Some(_), [_, pot_id, "stop-milk"]) => match method {
            "WHEN" => stop_milk(engine, pot_id),
            _ => method_not_allowed(&["WHEN"]),
        },
        // A BREW outside the coffee/tea universe deserves a 418.
        _ if method == "BREW" => wrong_universe(&request.path),
        _ => Response::error(
            StatusCode::NotFound,
            &format!("no route for {}", request.path),
        ),
    }
}

fn beverage_for(family: &str) -> Option<Beverage> {
    match family {
        "coffee" => Some(Beverage::Coffee),
        "tea" => Some(Beverage::Tea),
        _ => None,
    }
}

fn brew(engine: &BrewEngine, beverage: Beverage, pot_id: &str, request: &Request) -> Response {
    let additions = match request.header("accept-additions") {
        Some(header) => match parse_additions(header) {
            Ok(additions) => additions,
            Err(err) => return Response::error(StatusCode::BadRequest, &err.to_string()),
        },
        None => Additions::new(),
    };

    let echo: serde_json::Map<String, Value> = additions
        .iter()
        .map(|(key, value)| (key.to_string(), json!(value)))
        .collect();

    match engine.brew(pot_id, beverage, additions) {
        Ok(outcome) => {
            let mut body = json!({
                "brew_id": outcome.brew_id,
                "pot_id": pot_id,
                "message": outcome.message,
                "state": outcome.resulting_state,
                "accept-additions": echo,
                "milk_pouring": outcome.milk_pouring,
                "when_required": outcome.milk_pouring,
                "protocol": PROTOCOL,
            });
            if outcome.status == StatusCode::ImATeapot {
                body["hint"] = json!("Tip me over and pour me out.");
            }
            Response::new(outcome.status, body)
        }
        Err(err) => pot_not_found(engine, &err),
    }
}

fn status(engine: &BrewEngine, pot_id: &str) -> Response {
    match engine.status(pot_id) {
        Ok(snapshot) => Response::new(StatusCode::Ok, json!(snapshot)),
        Err(err) => pot_not_found(engine, &err),
    }
}

fn history(engine: &BrewEngine, pot_id: &str) -> Response {
    match engine.history(pot_id) {
        Ok(records) => Response::new(
            StatusCode::Ok,
            json!({
                "pot_id": pot_id,
                "total_brews": records.len(),
                "brews": records,
            }),
        ),
        Err(err) => pot_not_found(engine, &err),
    }
}

fn list_additions(engine: &BrewEngine, pot_id: &str) -> Response {
    match engine.list_additions(pot_id) {
        Ok(vocabulary) => {
            let mut body = serde_json::Map::new();
            for (key, values) in vocabulary.entries() {
                let _ = body.insert(key.clone(), json!(values));
            }
            let _ = body.insert("decaf".to_string(), json!(DECAF_NOTE));
            let _ = body.insert("rfc".to_string(), json!("RFC 2324 §2.1.1"));
            Response::new(StatusCode::Ok, Value::Object(body))
        }
        Err(err) => pot_not_found(engine, &err),
    }
}

fn stop_milk(engine: &BrewEngine, pot_id: &str) -> Response {
    match engine.stop_milk(pot_id) {
        Ok(ack) => {
            let message = match ack {
                MilkAck::Stopped => "Milk pouring stopped.",
                MilkAck::Noop => {
                    "No milk was being poured, but your enthusiasm is appreciated."
                }
            };
            Response::new(
                StatusCode::Ok,
                json!({
                    "pot_id": pot_id,
                    "result": ack,
                    "message": message,
                    "rfc": "RFC 2324 §2.1.3",
                }),
            )
        }
        Err(err) => pot_not_found(engine, &err),
    }
}

fn registry_view(engine: &BrewEngine) -> Response {
    let pots = engine.registry();
    let additions: Vec<String> = pots
        .first()
        .and_then(|pot| engine.list_additions(&pot.pot_id).ok())
        .map(|vocabulary| vocabulary.keys().map(String::from).collect())
        .unwrap_or_default();

    Response::new(
        StatusCode::Ok,
        json!({
            "protocol": PROTOCOL,
            "rfc": RFCS,
            "pots": pots,
            "methods": ["BREW", "GET", "PROPFIND", "WHEN"],
            "supported_additions": additions,
        }),
    )
}

fn pot_not_found(engine: &BrewEngine, err: &RegistryError) -> Response {
    let registered: Vec<String> = engine
        .registry()
        .into_iter()
        .map(|pot| pot.pot_id)
        .collect();
    Response::new(
        StatusCode::NotFound,
        json!({
            "error": StatusCode::NotFound.reason(),
            "message": err.to_string(),
            "registered_pots": registered,
        }),
    )
}

fn method_not_allowed(allowed: &[&str]) -> Response {
    Response::new(
        StatusCode::MethodNotAllowed,
        json!({
            "error": StatusCode::MethodNotAllowed.reason(),
            "allowed": allowed,
        }),
    )
}

fn wrong_universe(path: &str) -> Response {
    Response::new(
        StatusCode::ImATeapot,
        json!({
            "error": "Wrong universe",
            "message": format!("BREW is not valid on {path}"),
            "hint": "BREW is only valid on /coffee and /tea resources.",
            "rfc": "RFC 2324 §2.1",
        }),
    )
}
