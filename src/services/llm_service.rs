//! LLM 服务 - 业务能力层
//!
//! 只负责"把提示词发给上游模型拿回文本"能力，不关心流程
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 支持自定义 API 端点和模型
//! - 兼容 OpenAI API 的服务（如 Azure, Gemini, Doubao 等）

use anyhow::Result;
use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use std::future::Future;
use tracing::{debug, warn};

use crate::config::Config;

/// 上游文本生成能力
///
/// 编排层对该 trait 泛型，测试时用桩实现替换真实网络调用
pub trait TextGenerator: Send + Sync {
    /// 提交提示词，返回模型的自由文本回复
    fn generate(&self, prompt: &str) -> impl Future<Output = Result<String>> + Send;
}

/// LLM 服务
///
/// 职责：
/// - 调用 LLM API 生成文本
/// - 只处理单条提示词
/// - 不出现 Vec<QuestionSet>
/// - 不关心重试、缓存与解析
pub struct LlmService {
    client: Client<OpenAIConfig>,
    model_name: String,
    temperature: f32,
    max_tokens: u32,
}

impl LlmService {
    /// 创建新的 LLM 服务
    pub fn new(config: &Config) -> Self {
        // 配置 OpenAI 客户端（兼容 OpenAI API 的服务）
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.llm_api_key)
            .with_api_base(&config.llm_api_base_url);

        let client = Client::with_config(openai_config);

        Self {
            client,
            model_name: config.llm_model_name.clone(),
            temperature: config.llm_temperature,
            max_tokens: config.llm_max_tokens,
        }
    }

    /// 发送提示词并取回文本回复
    ///
    /// # 参数
    /// - `prompt`: 用户消息内容（完整的出题提示词）
    ///
    /// # 返回
    /// 返回模型回复的原始文本（去除首尾空白）
    pub async fn send_to_llm(&self, prompt: &str) -> Result<String> {
        debug!("调用 LLM API，模型: {}", self.model_name);
        debug!("提示词长度: {} 字符", prompt.chars().count());

        // 构建消息列表
        let system_msg = ChatCompletionRequestSystemMessageArgs::default()
            .content("你是一名严谨的教育出题助手，始终只输出符合要求的 JSON，不输出任何多余文字。")
            .build()?;

        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(prompt)
            .build()?;

        let messages = vec![
            ChatCompletionRequestMessage::System(system_msg),
            ChatCompletionRequestMessage::User(user_msg),
        ];

        // 构建请求
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(messages)
            .temperature(self.temperature)
            .max_tokens(self.max_tokens)
            .build()?;

        // 调用 API
        let response = self.client.chat().create(request).await.map_err(|e| {
            warn!("LLM API 调用失败: {}", e);
            anyhow::anyhow!("LLM API 调用失败: {}", e)
        })?;

        debug!("LLM API 调用成功");

        // 提取响应内容
        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| anyhow::anyhow!("LLM 返回内容为空"))?;

        Ok(content.trim().to_string())
    }
}

impl TextGenerator for LlmService {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.send_to_llm(prompt).await
    }
}
