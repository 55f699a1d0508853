use js_sys::{Array, Function, Promise, Reflect};
use serde::Serialize;
use serde_json::{Map, Value};
use serde_wasm_bindgen::{from_value, Serializer};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use super::*;

const UPLOADER_KEY: &str = "ApperFileUploader";
const FILE_FIELD_KEY: &str = "FileField";

/// Live reference to the page's file uploader namespace.
#[derive(Debug, Clone)]
pub struct RuntimeHandle {
    uploader: JsValue,
}

fn js_error(err: &JsValue) -> String {
    if let Some(error) = err.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

fn is_missing(value: &JsValue) -> bool {
    value.is_undefined() || value.is_null()
}

fn get(target: &JsValue, key: &str) -> Result<JsValue, String> {
    let value = Reflect::get(target, &JsValue::from_str(key)).map_err(|err| js_error(&err))?;
    if is_missing(&value) {
        return Err(format!("widget runtime is missing `{key}`"));
    }
    Ok(value)
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, String> {
    value
        .serialize(&Serializer::json_compatible())
        .map_err(|err| err.to_string())
}

fn call(target: &JsValue, method: &str, args: &[JsValue]) -> Result<JsValue, String> {
    let function = get(target, method)?
        .dyn_into::<Function>()
        .map_err(|_| format!("widget runtime `{method}` is not a function"))?;
    let argv = Array::new();
    for arg in args {
        argv.push(arg);
    }
    Reflect::apply(&function, target, &argv).map_err(|err| js_error(&err))
}

fn file_field(handle: &RuntimeHandle) -> Result<JsValue, String> {
    get(&handle.uploader, FILE_FIELD_KEY)
}

pub fn probe_runtime(global_name: &str) -> Option<RuntimeHandle> {
    let global = js_sys::global();
    let sdk = Reflect::get(&global, &JsValue::from_str(global_name)).ok()?;
    if is_missing(&sdk) {
        return None;
    }
    let uploader = Reflect::get(&sdk, &JsValue::from_str(UPLOADER_KEY)).ok()?;
    if is_missing(&uploader) {
        return None;
    }
    Some(RuntimeHandle { uploader })
}

pub async fn mount(
    handle: &RuntimeHandle,
    identity: &str,
    config: &MountConfig,
) -> Result<(), String> {
    let field = file_field(handle)?;
    let result = call(
        &field,
        "mount",
        &[JsValue::from_str(identity), to_js(config)?],
    )?;
    if let Ok(promise) = result.dyn_into::<Promise>() {
        JsFuture::from(promise)
            .await
            .map_err(|err| js_error(&err))?;
    }
    Ok(())
}

pub fn unmount(handle: &RuntimeHandle, identity: &str) -> Result<(), String> {
    let field = file_field(handle)?;
    call(&field, "unmount", &[JsValue::from_str(identity)]).map(|_| ())
}

pub fn update_files(
    handle: &RuntimeHandle,
    field_key: &str,
    files: &[UiFileRecord],
) -> Result<(), String> {
    let field = file_field(handle)?;
    call(
        &field,
        "updateFiles",
        &[JsValue::from_str(field_key), to_js(files)?],
    )
    .map(|_| ())
}

pub fn clear_field(handle: &RuntimeHandle, field_key: &str) -> Result<(), String> {
    let field = file_field(handle)?;
    call(&field, "clearField", &[JsValue::from_str(field_key)]).map(|_| ())
}

pub fn to_ui_format(
    handle: &RuntimeHandle,
    files: &[ApiFileRecord],
) -> Result<Vec<UiFileRecord>, String> {
    let converted = call(&handle.uploader, "toUIFormat", &[to_js(files)?])?;
    let records: Vec<Map<String, Value>> = from_value(converted)
        .map_err(|err| format!("toUIFormat returned an unexpected shape: {err}"))?;
    Ok(records.into_iter().map(UiFileRecord::from_converted).collect())
}
