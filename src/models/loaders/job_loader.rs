use crate::models::quantities::Quantities;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

/// 一个待处理的出题任务
///
/// 任务以 TOML 文件描述：文档名、文件类型、已抽取的正文
/// （内联 `text` 或外部 `text_file` 二选一）以及各类题目的请求数量
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationJob {
    /// 文档名（用于提示词和输出文件名）
    pub name: String,
    /// 文件类型（pdf / docx / xlsx / txt…，仅作为提示词上下文）
    #[serde(default = "default_file_type")]
    pub file_type: String,
    /// 已抽取的文档正文（内联）
    #[serde(default)]
    pub text: Option<String>,
    /// 已抽取的文档正文（外部文件路径，相对于任务文件所在目录）
    #[serde(default)]
    pub text_file: Option<String>,
    /// 各类题目的请求数量
    #[serde(default)]
    pub quantities: Quantities,
    /// 任务文件自身的路径（加载后回填，不参与序列化）
    #[serde(skip_serializing, skip_deserializing)]
    pub file_path: Option<String>,
}

fn default_file_type() -> String {
    "txt".to_string()
}

impl GenerationJob {
    /// 取出文档正文
    ///
    /// 优先使用内联 `text`；否则读取 `text_file` 指向的文件
    pub async fn resolve_text(&self) -> Result<String> {
        if let Some(text) = &self.text {
            return Ok(text.clone());
        }

        let text_file = self
            .text_file
            .as_ref()
            .context("任务既没有内联 text 也没有 text_file")?;

        // text_file 相对于任务文件所在目录解析
        let base = self
            .file_path
            .as_deref()
            .and_then(|p| Path::new(p).parent().map(|d| d.to_path_buf()))
            .unwrap_or_default();
        let path = base.join(text_file);

        fs::read_to_string(&path)
            .await
            .with_context(|| format!("无法读取正文文件: {}", path.display()))
    }
}

/// 从 TOML 文件加载单个出题任务
pub async fn load_toml_to_job(toml_file_path: &Path) -> Result<GenerationJob> {
    let content = fs::read_to_string(toml_file_path)
        .await
        .with_context(|| format!("无法读取TOML文件: {}", toml_file_path.display()))?;

    let mut job: GenerationJob = toml::from_str(&content)
        .with_context(|| format!("无法解析TOML文件: {}", toml_file_path.display()))?;

    // 设置文件路径
    job.file_path = Some(toml_file_path.to_string_lossy().to_string());

    Ok(job)
}

/// 从文件夹中加载所有 TOML 任务文件
///
/// 单个文件加载失败只记录警告，不影响其余任务
pub async fn load_all_job_files(folder_path: &str) -> Result<Vec<GenerationJob>> {
    let folder = PathBuf::from(folder_path);

    if !folder.exists() {
        anyhow::bail!("文件夹不存在: {}", folder_path);
    }

    let mut jobs = Vec::new();
    let mut entries = fs::read_dir(&folder)
        .await
        .with_context(|| format!("无法读取文件夹: {}", folder_path))?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) == Some("toml") {
            tracing::info!(
                "正在加载: {}",
                path.file_name().unwrap_or_default().to_string_lossy()
            );

            match load_toml_to_job(&path).await {
                Ok(job) => {
                    tracing::info!("成功加载任务: {}", job.name);
                    jobs.push(job);
                }
                Err(e) => {
                    tracing::warn!("加载文件失败 {}: {}", path.display(), e);
                }
            }
        }
    }

    Ok(jobs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_toml_round_trip() {
        let toml_src = r#"
name = "生物必修一第三章"
file_type = "pdf"
text = "细胞是生物体结构和功能的基本单位。"

[quantities]
flashcards = 8
mcqs = 4
trueFalse = 3
"#;
        let job: GenerationJob = toml::from_str(toml_src).unwrap();
        assert_eq!(job.name, "生物必修一第三章");
        assert_eq!(job.file_type, "pdf");
        assert_eq!(job.quantities.flashcards, 8);
        assert_eq!(job.quantities.mcqs, 4);
        assert_eq!(job.quantities.true_false, 3);
        // 未给出的数量走默认值
        assert_eq!(job.quantities.matching, Quantities::default().matching);
    }

    #[tokio::test]
    async fn test_resolve_text_prefers_inline() {
        let job = GenerationJob {
            name: "t".to_string(),
            file_type: "txt".to_string(),
            text: Some("内联正文".to_string()),
            text_file: Some("不存在的文件.txt".to_string()),
            quantities: Quantities::default(),
            file_path: None,
        };
        assert_eq!(job.resolve_text().await.unwrap(), "内联正文");
    }

    #[tokio::test]
    async fn test_resolve_text_missing_both_is_error() {
        let job = GenerationJob {
            name: "t".to_string(),
            file_type: "txt".to_string(),
            text: None,
            text_file: None,
            quantities: Quantities::default(),
            file_path: None,
        };
        assert!(job.resolve_text().await.is_err());
    }
}
