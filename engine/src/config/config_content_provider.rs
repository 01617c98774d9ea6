use std::io::ErrorKind;
use std::sync::Mutex;

pub trait ConfigContentProvider {
    fn get_config_content(&self) -> Result<Option<String>, String>;
    fn set_config_content(&self, content: &str) -> Result<(), String>;
}

pub struct FileContentConfigProvider {
    file_path: String,
}

impl FileContentConfigProvider {
    pub fn new(file_path: String) -> Self {
        Self { file_path }
    }
}

impl ConfigContentProvider for FileContentConfigProvider {
    fn get_config_content(&self) -> Result<Option<String>, String> {
        match std::fs::read_to_string(self.file_path.as_str()) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(format!("Failed to read settings file: {}", err)),
        }
    }

    fn set_config_content(&self, content: &str) -> Result<(), String> {
        std::fs::write(self.file_path.as_str(), content)
            .map_err(|e| format!("Failed to write settings file: {}", e))
    }
}

/// Keeps content in memory; lets tests exercise the manager without disk.
#[derive(Default)]
pub struct InMemoryContentProvider {
    content: Mutex<Option<String>>,
}

impl InMemoryContentProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_content(content: &str) -> Self {
        Self {
            content: Mutex::new(Some(content.to_string())),
        }
    }
}

impl ConfigContentProvider for InMemoryContentProvider {
    fn get_config_content(&self) -> Result<Option<String>, String> {
        Ok(self.content.lock().unwrap().clone())
    }

    fn set_config_content(&self, content: &str) -> Result<(), String> {
        *self.content.lock().unwrap() = Some(content.to_string());
        Ok(())
    }
}
