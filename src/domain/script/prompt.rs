const SCRIPT_GENERATOR_PROMPT: &str = r#"Você é um roteirista especializado em criar scripts de podcast em português brasileiro.

Seu objetivo é criar um diálogo natural e envolvente entre {num_hosts} participante(s) discutindo o tema fornecido pelo usuário.

## REGRAS:
1. O script deve ter aproximadamente {duracao} minutos de duração quando lido em voz alta
2. Use o formato EXATO:
{speakers_format}
3. NÃO use nomes, apenas "Speaker 1", "Speaker 2", etc.
4. Escreva em português brasileiro natural e coloquial
5. Inclua:
   - Uma introdução ao tema
   - Discussão dos pontos principais
   - Exemplos práticos quando relevante
   - Uma conclusão
6. Evite jargões técnicos excessivos
7. Mantenha um tom conversacional e amigável
8. Distribua as falas de forma equilibrada entre todos os participantes

## TEMA DO PODCAST:
{tema}

## SCRIPT:"#;

const ENHANCE_PROMPT: &str = r#"Você é um assistente especializado em aprimorar textos para podcasts.

Seu objetivo é pegar a ideia ou tema do usuário e transformá-lo em uma descrição mais rica, detalhada e interessante para servir como base para um podcast.

## REGRAS:
1. Mantenha a essência da ideia original
2. Expanda com pontos interessantes que poderiam ser discutidos
3. Adicione contexto relevante se apropriado
4. Use português brasileiro formal mas acessível
5. O texto deve ter entre 3-5 parágrafos
6. NÃO inclua introduções como "Aqui está o texto aprimorado"
7. Vá direto ao conteúdo aprimorado

## TEXTO ORIGINAL:
{texto}

## TEXTO APRIMORADO:"#;

/// One `Speaker N: [...]` example line per host
pub fn build_speakers_format(num_hosts: u8) -> String {
    (1..=num_hosts)
        .map(|i| format!("   Speaker {}: [fala do host {}]", i, i))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn build_script_prompt(theme: &str, duration_minutes: u8, num_hosts: u8) -> String {
    SCRIPT_GENERATOR_PROMPT
        .replace("{num_hosts}", &num_hosts.to_string())
        .replace("{duracao}", &duration_minutes.to_string())
        .replace("{speakers_format}", &build_speakers_format(num_hosts))
        // Theme last so user text containing placeholders is left alone
        .replace("{tema}", theme)
}

pub fn build_enhance_prompt(text: &str) -> String {
    ENHANCE_PROMPT.replace("{texto}", text)
}
