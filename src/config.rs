/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    /// 同时处理的文档数量
    pub max_concurrent_documents: usize,
    /// 任务 TOML 文件存放目录
    pub jobs_folder: String,
    /// 生成结果输出目录
    pub output_folder: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
    // --- LLM 配置 ---
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
    /// 生成温度
    pub llm_temperature: f32,
    /// 单次生成的最大输出 token 数
    pub llm_max_tokens: u32,
    // --- 分块配置 ---
    /// 单个分块的目标大小（字符数）
    pub max_chunk_size: usize,
    /// 低于该长度的文档不分块，整体单次生成
    pub short_input_threshold: usize,
    // --- 缓存配置 ---
    /// 缓存条目过期时间（秒）
    pub cache_expiry_secs: u64,
    /// 超过该条目数时触发过期清扫
    pub cache_max_entries: usize,
    // --- 重试配置 ---
    /// 单个分块的最大尝试次数
    pub retry_max_attempts: usize,
    /// 首次重试前的等待（毫秒）
    pub retry_base_delay_ms: u64,
    /// 重试等待上限（毫秒）
    pub retry_max_delay_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_concurrent_documents: 4,
            jobs_folder: "jobs".to_string(),
            output_folder: "output_sets".to_string(),
            verbose_logging: false,
            output_log_file: "output.txt".to_string(),
            llm_api_key: String::new(),
            llm_api_base_url: "https://api.openai.com/v1".to_string(),
            llm_model_name: "gpt-4o-mini".to_string(),
            llm_temperature: 0.7,
            llm_max_tokens: 4096,
            max_chunk_size: 4000,
            short_input_threshold: 3000,
            cache_expiry_secs: 24 * 60 * 60,
            cache_max_entries: 100,
            retry_max_attempts: 3,
            retry_base_delay_ms: 500,
            retry_max_delay_ms: 5000,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            max_concurrent_documents: std::env::var("MAX_CONCURRENT_DOCUMENTS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_concurrent_documents),
            jobs_folder: std::env::var("JOBS_FOLDER").unwrap_or(default.jobs_folder),
            output_folder: std::env::var("OUTPUT_FOLDER").unwrap_or(default.output_folder),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
            llm_api_key: std::env::var("LLM_API_KEY").unwrap_or(default.llm_api_key),
            llm_api_base_url: std::env::var("LLM_API_BASE_URL").unwrap_or(default.llm_api_base_url),
            llm_model_name: std::env::var("LLM_MODEL_NAME").unwrap_or(default.llm_model_name),
            llm_temperature: std::env::var("LLM_TEMPERATURE").ok().and_then(|v| v.parse().ok()).unwrap_or(default.llm_temperature),
            llm_max_tokens: std::env::var("LLM_MAX_TOKENS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.llm_max_tokens),
            max_chunk_size: std::env::var("MAX_CHUNK_SIZE").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_chunk_size),
            short_input_threshold: std::env::var("SHORT_INPUT_THRESHOLD").ok().and_then(|v| v.parse().ok()).unwrap_or(default.short_input_threshold),
            cache_expiry_secs: std::env::var("CACHE_EXPIRY_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.cache_expiry_secs),
            cache_max_entries: std::env::var("CACHE_MAX_ENTRIES").ok().and_then(|v| v.parse().ok()).unwrap_or(default.cache_max_entries),
            retry_max_attempts: std::env::var("RETRY_MAX_ATTEMPTS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.retry_max_attempts),
            retry_base_delay_ms: std::env::var("RETRY_BASE_DELAY_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.retry_base_delay_ms),
            retry_max_delay_ms: std::env::var("RETRY_MAX_DELAY_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.retry_max_delay_ms),
        }
    }
}
