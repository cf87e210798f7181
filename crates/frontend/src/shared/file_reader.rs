/// Читает выбранный файл как текст. Невалидный UTF-8 заменяется, а не
/// роняет импорт целиком.
pub async fn read_file_text(file: web_sys::File) -> Result<String, String> {
    use wasm_bindgen_futures::JsFuture;

    // Читаем файл как ArrayBuffer
    let array_buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| format!("Failed to read file: {:?}", e))?;

    // Конвертируем ArrayBuffer в байты
    let uint8_array = js_sys::Uint8Array::new(&array_buffer);
    let mut bytes = vec![0; uint8_array.length() as usize];
    uint8_array.copy_to(&mut bytes);

    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
