//! Prompt builders for the generative text provider. The marker pairs in
//! [`crate::markers`] are part of the instructions here; the pipeline
//! extracts the delimited regions from the raw model output.

use crate::markers;

/// Free-form context supplied by the advice flow.
#[derive(Clone, Debug, Default)]
pub struct AdviceContext {
	pub timing: Option<String>,
	pub domain: Option<String>,
	pub free_word: Option<String>,
}

/// Taxonomy names resolved for one search step. Missing filters render as
/// empty strings so the prompt shape stays stable.
#[derive(Clone, Debug, Default)]
pub struct StepContext {
	pub industry_name: Option<String>,
	pub company_size_name: Option<String>,
	pub department_name: Option<String>,
	pub theme_name: Option<String>,
}

/// The fixed talent-retrieval query template.
pub fn talent_query(entity_name: &str) -> String {
	format!(
		"「{entity_name}」に優れた人材を抽出してください。名前、エグゼクティブサマリー、経歴は必ず加えてください。"
	)
}

/// Builds the dual-output advice prompt: an advisory text and a compact
/// retrieval query, each delimited by its own marker pair.
pub fn advice_prompt(ctx: &AdviceContext) -> String {
	let timing = ctx.timing.as_deref().filter(|s| !s.trim().is_empty()).unwrap_or("不明なタイミング");
	let domain = ctx.domain.as_deref().filter(|s| !s.trim().is_empty()).unwrap_or("不明な課題");
	let mut prompt = format!(
		"あなたはDXに精通した熟練のITコンサルタントです。\n\
		クライアントから以下の情報が提供されています：\n\n\
		- 現在のフェーズ（タイミング）：{timing}\n\
		- 解決したい課題領域：{domain}"
	);

	if let Some(free_word) = ctx.free_word.as_deref().filter(|s| !s.trim().is_empty()) {
		prompt.push_str(&format!("\n- 現場の背景・具体的な悩み：{}", free_word.trim()));
	}

	prompt.push_str(&format!(
		"\n\nこの情報をもとに、以下の2つの出力をしてください：\n\n\
		① {advice_start} 〜 {advice_end} で囲まれた領域に、400字程度のDX推進に向けたアドバイスを書いてください。\n\
		- フェーズに応じた最初の取り組み方針を提案してください。\n\
		- 課題領域に関して、熟練の視点で助言を与えてください。\n\
		- 現場の悩みがある場合は、それにも配慮してください（任意）。\n\
		- 最後に、関連する代表的なDX事例を1文で紹介してください。\n\n\
		② {prompt_start} 〜 {prompt_end} で囲まれた領域に、\n\
		ベクトル検索（RAG）用のシンプルな検索用プロンプトを日本語で作成してください。\n\
		- 内容はできる限り簡潔にし、「探したい事例の特徴・目的・課題」を箇条書き風または短文で表現してください。\n\
		- 単純なキーワード検索でも意味が通じるように意識してください。\n",
		advice_start = markers::ADVICE_START,
		advice_end = markers::ADVICE_END,
		prompt_start = markers::PROMPT_START,
		prompt_end = markers::PROMPT_END,
	));

	prompt
}

/// Builds the five-section Markdown strategy-document prompt from the
/// step's taxonomy names and the resolved case.
pub fn strategy_prompt(step: &StepContext, case_name: &str, case_summary: &str) -> String {
	let industry = step.industry_name.as_deref().unwrap_or("");
	let company_size = step.company_size_name.as_deref().unwrap_or("");
	let department = step.department_name.as_deref().unwrap_or("");
	let theme = step.theme_name.as_deref().unwrap_or("");

	format!(
		"あなたは熟練のITコンサルタントです。以下の情報をもとに、分かりやすい表現でMarkdown形式の戦略文書を作成してください。\
		余計なコメントは含めず、戦略文書部分のみを出力してください。\n\n\
		【業界】：{industry}\n\
		【企業規模】：{company_size}\n\
		【部署】：{department}\n\
		【テーマ】：{theme}\n\n\
		【指定事例】\n\
		事例名：{case_name}\n\
		事例概要：{case_summary}\n\n\
		【戦略文書の章立て】\n\
		1. プロジェクトの概要\n\
		   - プロジェクト名\n\
		   - 目的と目標\n\
		   - 背景と必要性\n\
		2. ビジネスインパクト\n\
		   - 期待されるビジネス効果\n\
		   - 現在の課題とその解決策\n\
		3. 主要なステークホルダーとリソース計画\n\
		   - 関係者リスト\n\
		   - 必要な資源（人材、技術、設備など）：指定した【企業規模】に応じた調達費用の目安も示してください。\n\
		   - リソースの配分と管理\n\
		4. 簡易なコスト見積もり\n\
		   - 各項目ごとに「〇〇円～〇〇円」という形で、企業規模に応じた金額幅を示してください。\n\
		5. タイムラインの概要\n\
		   - 主要なマイルストーンと各フェーズのおおよその期間、タスク概要を記載してください。\n\n\
		必ず戦略文書部分を以下のマーカーで囲んで出力してください。\n\
		{strategy_start}\n\
		{strategy_end}",
		strategy_start = markers::STRATEGY_START,
		strategy_end = markers::STRATEGY_END,
	)
}
